//! Horse race simulation.
//!
//! Every tick each unfinished racer gains a uniform random step, clamped at the
//! finish line. Racers that reach the line are appended to the finish order in
//! lane order, so ties inside a single tick are broken by lane.

use crate::defaults::{FINISH_LINE, MAX_STEP, RACE_TICK_MS};
use log::{debug, info};
use once_cell::sync::Lazy;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::Deserialize;
use std::rc::Rc;
use yew::Reducible;

static STEP: Lazy<Uniform<f64>> =
    Lazy::new(|| Uniform::new(0.0, MAX_STEP).expect("step bounds are ordered"));

/// One lane of the race. `progress` is a percentage in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Racer {
    pub name: String,
    pub color: String,
    #[serde(skip, default)]
    pub progress: f64,
}

impl Racer {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            progress: 0.0,
        }
    }

    pub fn has_finished(&self) -> bool {
        self.progress >= FINISH_LINE
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceTick {
    /// The race is not running; nothing changed.
    Ignored,
    Running,
    /// The last racer crossed the line on this tick.
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Race {
    racers: Vec<Racer>,
    /// Lane indices in crossing order.
    finish_order: Vec<usize>,
    active: bool,
    ticks: u32,
}

impl Race {
    pub fn new(racers: Vec<Racer>) -> Self {
        Self {
            racers,
            finish_order: Vec::new(),
            active: false,
            ticks: 0,
        }
    }

    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    pub fn finish_order(&self) -> &[usize] {
        &self.finish_order
    }

    /// Whether the tick schedule should be running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once a started race has seen every racer cross the line.
    pub fn is_over(&self) -> bool {
        !self.active && self.ticks > 0 && self.finish_order.len() == self.racers.len()
    }

    /// Simulated race time, derived from the number of ticks taken.
    pub fn elapsed_ms(&self) -> u64 {
        u64::from(self.ticks) * u64::from(RACE_TICK_MS)
    }

    /// Finishers with their 1-based place.
    pub fn standings(&self) -> impl Iterator<Item = (usize, &Racer)> + '_ {
        self.finish_order
            .iter()
            .enumerate()
            .map(move |(rank, &lane)| (rank + 1, &self.racers[lane]))
    }

    /// Put every racer back on the start line and begin ticking.
    pub fn start(&mut self) {
        for racer in &mut self.racers {
            racer.progress = 0.0;
        }
        self.finish_order.clear();
        self.ticks = 0;
        self.active = true;
        info!("Race started with {} racers", self.racers.len());
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RaceTick {
        if !self.active {
            return RaceTick::Ignored;
        }
        self.ticks += 1;

        for racer in self.racers.iter_mut().filter(|r| !r.has_finished()) {
            let step = STEP.sample(rng);
            racer.progress = (racer.progress + step).min(FINISH_LINE);
        }

        for (lane, racer) in self.racers.iter().enumerate() {
            if racer.has_finished() && !self.finish_order.contains(&lane) {
                self.finish_order.push(lane);
                debug!(
                    "{} crossed the line in place {}",
                    racer.name,
                    self.finish_order.len()
                );
            }
        }

        if self.racers.iter().all(Racer::has_finished) {
            self.active = false;
            info!(
                "Race finished after {} ticks ({} ms)",
                self.ticks,
                self.elapsed_ms()
            );
            RaceTick::Finished
        } else {
            RaceTick::Running
        }
    }
}

pub enum RaceAction {
    Start,
    Tick,
}

impl Reducible for Race {
    type Action = RaceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            RaceAction::Start => {
                let mut next = (*self).clone();
                next.start();
                next.into()
            }
            // A tick that outlived its schedule must not touch a finished race.
            RaceAction::Tick if !self.active => self,
            RaceAction::Tick => {
                let mut next = (*self).clone();
                next.tick(&mut rand::rng());
                next.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(n: usize) -> Vec<Racer> {
        (0..n)
            .map(|i| Racer::new(format!("Horse {}", i + 1), "#000000"))
            .collect()
    }

    fn run_to_end(race: &mut Race, rng: &mut StdRng) -> u32 {
        let mut ticks = 0;
        while race.tick(rng) != RaceTick::Finished {
            ticks += 1;
            assert!(ticks < 10_000, "race never finished");
        }
        ticks + 1
    }

    #[test]
    fn progress_stays_in_bounds_and_never_decreases() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut race = Race::new(field(6));
        race.start();

        let mut previous: Vec<f64> = race.racers().iter().map(|r| r.progress).collect();
        while race.is_active() {
            race.tick(&mut rng);
            for (racer, before) in race.racers().iter().zip(&previous) {
                assert!((0.0..=FINISH_LINE).contains(&racer.progress));
                assert!(racer.progress >= *before);
            }
            previous = race.racers().iter().map(|r| r.progress).collect();
        }
    }

    #[test]
    fn every_racer_finishes_exactly_once() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut race = Race::new(field(8));
            race.start();
            run_to_end(&mut race, &mut rng);

            let mut order = race.finish_order().to_vec();
            assert_eq!(order.len(), 8);
            order.sort_unstable();
            assert_eq!(order, (0..8).collect::<Vec<_>>());
            assert!(race.is_over());
        }
    }

    #[test]
    fn finishing_takes_at_least_fifty_ticks() {
        // Each step is below 2.0, so 100% cannot be reached in fewer than 51 ticks.
        let mut rng = StdRng::seed_from_u64(3);
        let mut race = Race::new(field(3));
        race.start();
        let ticks = run_to_end(&mut race, &mut rng);
        assert!(ticks > 50);
        assert_eq!(race.elapsed_ms(), u64::from(ticks) * u64::from(RACE_TICK_MS));
    }

    #[test]
    fn tick_after_finish_is_ignored() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut race = Race::new(field(4));
        race.start();
        run_to_end(&mut race, &mut rng);

        let snapshot = race.clone();
        assert_eq!(race.tick(&mut rng), RaceTick::Ignored);
        assert_eq!(race, snapshot);
    }

    #[test]
    fn tick_before_start_is_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut race = Race::new(field(2));
        assert_eq!(race.tick(&mut rng), RaceTick::Ignored);
        assert!(race.racers().iter().all(|r| r.progress == 0.0));
        assert!(!race.is_over());
    }

    #[test]
    fn restart_clears_progress_and_results() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut race = Race::new(field(5));
        race.start();
        run_to_end(&mut race, &mut rng);

        race.start();
        assert!(race.is_active());
        assert!(race.finish_order().is_empty());
        assert!(race.racers().iter().all(|r| r.progress == 0.0));
        assert_eq!(race.elapsed_ms(), 0);
    }

    #[test]
    fn standings_are_one_based_and_follow_finish_order() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut race = Race::new(field(3));
        race.start();
        run_to_end(&mut race, &mut rng);

        let standings: Vec<(usize, &str)> = race
            .standings()
            .map(|(place, r)| (place, r.name.as_str()))
            .collect();
        assert_eq!(standings.len(), 3);
        for (i, (place, name)) in standings.iter().enumerate() {
            assert_eq!(*place, i + 1);
            assert_eq!(*name, race.racers()[race.finish_order()[i]].name);
        }
    }

    #[test]
    fn empty_field_finishes_on_first_tick() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut race = Race::new(Vec::new());
        race.start();
        assert_eq!(race.tick(&mut rng), RaceTick::Finished);
        assert!(race.is_over());
    }

    #[test]
    fn stale_tick_action_returns_same_state() {
        let race = Rc::new(Race::new(field(2)));
        let after = race.clone().reduce(RaceAction::Tick);
        assert!(Rc::ptr_eq(&race, &after));
    }
}
