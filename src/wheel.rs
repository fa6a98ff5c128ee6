//! Spinning-wheel participant picker.
//!
//! The eligible pool (present and not yet picked) is laid out clockwise in
//! equal slices starting at the pointer. A spin adds a random number of whole
//! degrees to the cumulative rotation; once the wheel settles, the slice under
//! the fixed pointer at the top wins.
//!
//! The pool is snapshotted when the spin starts and the winner is resolved
//! against that snapshot, so roster edits made while the wheel is turning only
//! affect the next spin.

use crate::defaults::{DEFAULT_CANDIDATES, SPIN_MAX_EXTRA_DEG, SPIN_MIN_EXTRA_DEG};
use log::{debug, info, warn};
use rand::Rng;
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

/// Stable identity of a roster entry, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub present: bool,
    pub selected: bool,
}

impl Candidate {
    pub fn is_eligible(&self) -> bool {
        self.present && !self.selected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    /// Nobody is left to pick.
    EmptyPool,
    AlreadySpinning,
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinError::EmptyPool => write!(
                f,
                "All participants have been selected. Please reset the selections to continue."
            ),
            SpinError::AlreadySpinning => write!(f, "The wheel is already spinning"),
        }
    }
}

impl std::error::Error for SpinError {}

/// Summary of a spin that has been committed to a rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinTicket {
    pub pool_size: usize,
    pub extra_rotation: f64,
    /// Cumulative rotation the wheel is turning towards.
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingSpin {
    pool: Vec<(CandidateId, String)>,
    rotation: f64,
}

/// Geometry of one wheel slice, in degrees clockwise from the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub start: f64,
    pub sweep: f64,
    pub hue: f64,
}

impl Slice {
    /// Angle at which the label is drawn.
    pub fn label_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Angular size of one slice for a pool of `pool_size` entries.
pub fn slice_angle(pool_size: usize) -> f64 {
    360.0 / pool_size as f64
}

/// Index of the slice under the pointer after the wheel has turned
/// `rotation` degrees clockwise.
///
/// The wheel turns under a fixed pointer, so the angle the pointer sits at
/// relative to the wheel is the rotation mirrored: `(360 - rotation % 360) % 360`.
pub fn winning_index(rotation: f64, pool_size: usize) -> Option<usize> {
    if pool_size == 0 {
        return None;
    }
    let turned = rotation.rem_euclid(360.0);
    let pointer = (360.0 - turned).rem_euclid(360.0);
    let index = (pointer / slice_angle(pool_size)).floor() as usize;
    Some(index.min(pool_size - 1))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wheel {
    candidates: Vec<Candidate>,
    next_id: u32,
    rotation: f64,
    pending: Option<PendingSpin>,
    winner: Option<String>,
    celebrating: bool,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES)
    }
}

impl Wheel {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wheel = Self {
            candidates: Vec::new(),
            next_id: 0,
            rotation: 0.0,
            pending: None,
            winner: None,
            celebrating: false,
        };
        for name in names {
            wheel.add(name.as_ref());
        }
        wheel
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn eligible(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.candidates.iter().filter(|c| c.is_eligible())
    }

    pub fn pool_size(&self) -> usize {
        self.eligible().count()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Name of the most recent pick, if any since the last reset.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// Append a candidate. Blank names are ignored.
    pub fn add(&mut self, name: &str) -> Option<CandidateId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = CandidateId(self.next_id);
        self.next_id += 1;
        self.candidates.push(Candidate {
            id,
            name: name.to_string(),
            present: true,
            selected: false,
        });
        debug!("Added candidate {} ({:?})", name, id);
        Some(id)
    }

    pub fn remove(&mut self, index: usize) -> Option<Candidate> {
        if index >= self.candidates.len() {
            return None;
        }
        let removed = self.candidates.remove(index);
        debug!("Removed candidate {}", removed.name);
        Some(removed)
    }

    pub fn toggle_presence(&mut self, index: usize) {
        if let Some(candidate) = self.candidates.get_mut(index) {
            candidate.present = !candidate.present;
        }
    }

    pub fn can_spin(&self) -> Result<(), SpinError> {
        if self.is_spinning() {
            Err(SpinError::AlreadySpinning)
        } else if self.pool_size() == 0 {
            Err(SpinError::EmptyPool)
        } else {
            Ok(())
        }
    }

    /// Start a spin with a random extra rotation of two to three turns.
    pub fn begin_spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SpinTicket, SpinError> {
        self.can_spin()?;
        let extra = rng.random_range(SPIN_MIN_EXTRA_DEG..SPIN_MAX_EXTRA_DEG);
        self.spin_by(f64::from(extra))
    }

    /// Start a spin that turns the wheel exactly `extra_rotation` degrees further.
    pub fn spin_by(&mut self, extra_rotation: f64) -> Result<SpinTicket, SpinError> {
        self.can_spin()?;
        let pool: Vec<(CandidateId, String)> = self
            .eligible()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        self.rotation += extra_rotation;

        let ticket = SpinTicket {
            pool_size: pool.len(),
            extra_rotation,
            rotation: self.rotation,
        };
        info!(
            "Spinning {} degrees over {} candidates",
            extra_rotation,
            pool.len()
        );
        self.pending = Some(PendingSpin {
            pool,
            rotation: self.rotation,
        });
        Ok(ticket)
    }

    /// Resolve the pending spin and mark its winner as picked.
    ///
    /// Returns `None` when no spin is pending.
    pub fn settle(&mut self) -> Option<&str> {
        let pending = self.pending.take()?;
        let index = winning_index(pending.rotation, pending.pool.len())?;
        let (id, name) = pending.pool.into_iter().nth(index)?;

        match self.candidates.iter_mut().find(|c| c.id == id) {
            Some(candidate) => candidate.selected = true,
            None => warn!("{} left the roster while the wheel was spinning", name),
        }
        info!("Wheel picked {}", name);
        self.winner = Some(name);
        self.celebrating = true;
        self.winner.as_deref()
    }

    pub fn end_celebration(&mut self) {
        self.celebrating = false;
    }

    /// Make everyone pickable again and return the wheel to its start angle.
    ///
    /// A spin still in flight is dropped without picking anyone.
    pub fn reset_selections(&mut self) {
        for candidate in &mut self.candidates {
            candidate.selected = false;
        }
        if self.pending.take().is_some() {
            debug!("Pending spin discarded by reset");
        }
        self.rotation = 0.0;
        self.winner = None;
        self.celebrating = false;
    }

    /// Slices to draw: the spin snapshot while turning, the live pool otherwise.
    pub fn slices(&self) -> Vec<Slice> {
        let labels: Vec<&str> = match &self.pending {
            Some(pending) => pending.pool.iter().map(|(_, name)| name.as_str()).collect(),
            None => self.eligible().map(|c| c.name.as_str()).collect(),
        };
        let sweep = slice_angle(labels.len());
        labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Slice {
                label: label.to_string(),
                start: i as f64 * sweep,
                sweep,
                hue: i as f64 * sweep,
            })
            .collect()
    }
}

pub enum WheelAction {
    Add(String),
    Remove(usize),
    TogglePresence(usize),
    Spin,
    Settle,
    EndCelebration,
    ResetSelections,
}

impl Reducible for Wheel {
    type Action = WheelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            WheelAction::Add(name) => {
                next.add(&name);
            }
            WheelAction::Remove(index) => {
                next.remove(index);
            }
            WheelAction::TogglePresence(index) => next.toggle_presence(index),
            WheelAction::Spin => {
                if let Err(e) = next.begin_spin(&mut rand::rng()) {
                    warn!("Spin rejected: {}", e);
                    return self;
                }
            }
            WheelAction::Settle => {
                if next.settle().is_none() {
                    return self;
                }
            }
            WheelAction::EndCelebration => next.end_celebration(),
            WheelAction::ResetSelections => next.reset_selections(),
        }
        next.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(wheel: &Wheel) -> Vec<&str> {
        wheel.eligible().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn winning_index_matches_worked_example() {
        assert_eq!(winning_index(810.0, 4), Some(3));
    }

    #[test]
    fn winning_index_sweep_matches_integer_formula() {
        for pool_size in 1..=12usize {
            for rotation in 0..2_000u32 {
                let pointer = (360 - rotation % 360) % 360;
                let expected = (pointer as usize * pool_size) / 360;
                assert_eq!(
                    winning_index(f64::from(rotation), pool_size),
                    Some(expected),
                    "rotation {} pool {}",
                    rotation,
                    pool_size
                );
            }
        }
    }

    #[test]
    fn winning_index_known_points() {
        // No rotation: the pointer sits at the start of slice 0.
        assert_eq!(winning_index(0.0, 6), Some(0));
        assert_eq!(winning_index(720.0, 6), Some(0));
        // A small clockwise turn brings the last slice under the pointer.
        assert_eq!(winning_index(1.0, 6), Some(5));
        assert_eq!(winning_index(359.0, 6), Some(0));
        assert_eq!(winning_index(180.0, 2), Some(1));
        assert_eq!(winning_index(181.0, 2), Some(0));
        assert_eq!(winning_index(100.0, 0), None);
    }

    #[test]
    fn spin_picks_exactly_one_and_shrinks_pool() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.pool_size(), 6);

        let ticket = wheel.spin_by(810.0).unwrap();
        assert_eq!(ticket.pool_size, 6);
        assert!(wheel.is_spinning());
        // Pool is unchanged until the wheel settles.
        assert_eq!(wheel.pool_size(), 6);

        // 810 % 360 = 90, pointer at 270, slices of 60 degrees: index 4.
        assert_eq!(wheel.settle(), Some("Ben"));
        assert_eq!(wheel.pool_size(), 5);
        assert!(!wheel.is_spinning());
        assert!(wheel.is_celebrating());
        assert_eq!(wheel.winner(), Some("Ben"));
        let picked: Vec<_> = wheel.candidates().iter().filter(|c| c.selected).collect();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "Ben");
    }

    #[test]
    fn rotation_accumulates_across_spins() {
        let mut wheel = Wheel::default();
        wheel.spin_by(720.0).unwrap();
        wheel.settle();
        wheel.spin_by(750.0).unwrap();
        assert_eq!(wheel.rotation(), 1470.0);
    }

    #[test]
    fn random_spin_turns_two_to_three_times() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut wheel = Wheel::new(["a", "b", "c", "d", "e", "f", "g", "h"]);
        let mut before = wheel.rotation();
        while wheel.pool_size() > 0 {
            let ticket = wheel.begin_spin(&mut rng).unwrap();
            assert!((720.0..1080.0).contains(&ticket.extra_rotation));
            assert_eq!(ticket.extra_rotation.fract(), 0.0);
            assert_eq!(ticket.rotation, before + ticket.extra_rotation);
            before = ticket.rotation;
            wheel.settle().unwrap();
        }
        assert!(wheel.candidates().iter().all(|c| c.selected));
    }

    #[test]
    fn empty_pool_rejects_spin_without_changes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut wheel = Wheel::new(["Solo"]);
        wheel.begin_spin(&mut rng).unwrap();
        wheel.settle();

        let snapshot = wheel.clone();
        assert_eq!(wheel.begin_spin(&mut rng), Err(SpinError::EmptyPool));
        assert_eq!(wheel, snapshot);
        assert_eq!(
            SpinError::EmptyPool.to_string(),
            "All participants have been selected. Please reset the selections to continue."
        );
    }

    #[test]
    fn absent_candidates_are_not_eligible() {
        let mut wheel = Wheel::new(["A", "B"]);
        wheel.toggle_presence(0);
        wheel.toggle_presence(1);
        assert_eq!(wheel.can_spin(), Err(SpinError::EmptyPool));
        wheel.toggle_presence(1);
        assert_eq!(names(&wheel), vec!["B"]);
    }

    #[test]
    fn second_spin_while_turning_is_rejected() {
        let mut wheel = Wheel::default();
        wheel.spin_by(800.0).unwrap();
        assert_eq!(wheel.spin_by(800.0), Err(SpinError::AlreadySpinning));
        assert_eq!(wheel.rotation(), 800.0);
    }

    #[test]
    fn reset_clears_picks_and_rotation() {
        let mut wheel = Wheel::default();
        wheel.spin_by(810.0).unwrap();
        wheel.settle();
        wheel.spin_by(900.0).unwrap();
        wheel.settle();
        wheel.toggle_presence(0);

        wheel.reset_selections();
        assert!(wheel.candidates().iter().all(|c| !c.selected));
        assert_eq!(wheel.rotation(), 0.0);
        assert_eq!(wheel.winner(), None);
        assert!(!wheel.is_celebrating());
        // Presence is left alone.
        assert!(!wheel.candidates()[0].present);

        // With everyone back, the same turn picks the same slice as on a fresh wheel.
        let mut fresh = Wheel::default();
        fresh.toggle_presence(0);
        fresh.spin_by(810.0).unwrap();
        wheel.spin_by(810.0).unwrap();
        assert_eq!(wheel.settle(), fresh.settle());
    }

    #[test]
    fn reset_discards_pending_spin() {
        let mut wheel = Wheel::default();
        wheel.spin_by(810.0).unwrap();
        wheel.reset_selections();
        assert!(!wheel.is_spinning());
        assert_eq!(wheel.settle(), None);
        assert_eq!(wheel.pool_size(), 6);
    }

    #[test]
    fn settle_uses_snapshot_taken_at_spin_start() {
        let mut wheel = Wheel::new(["A", "B", "C", "D"]);
        // 810 over four slices lands on index 3, "D".
        wheel.spin_by(810.0).unwrap();
        wheel.toggle_presence(3);
        wheel.remove(0);
        wheel.add("E");

        assert_eq!(wheel.settle(), Some("D"));
        let d = wheel.candidates().iter().find(|c| c.name == "D").unwrap();
        assert!(d.selected);
        assert!(!d.present);
    }

    #[test]
    fn winner_removed_mid_spin_is_announced_only() {
        let mut wheel = Wheel::new(["A", "B", "C", "D"]);
        wheel.spin_by(810.0).unwrap();
        wheel.remove(3);

        assert_eq!(wheel.settle(), Some("D"));
        assert!(wheel.candidates().iter().all(|c| !c.selected));
        assert_eq!(wheel.pool_size(), 3);
    }

    #[test]
    fn slices_follow_snapshot_while_spinning() {
        let mut wheel = Wheel::new(["A", "B", "C"]);
        wheel.spin_by(720.0).unwrap();
        wheel.add("D");

        let slices = wheel.slices();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[1].start, 120.0);
        assert_eq!(slices[1].sweep, 120.0);
        assert_eq!(slices[1].label_angle(), 180.0);

        // 720 degrees brings slice 0 back under the pointer.
        assert_eq!(wheel.settle(), Some("A"));
        let labels: Vec<String> = wheel.slices().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["B", "C", "D"]);
    }

    #[test]
    fn settle_without_spin_is_a_no_op() {
        let mut wheel = Wheel::default();
        let snapshot = wheel.clone();
        assert_eq!(wheel.settle(), None);
        assert_eq!(wheel, snapshot);
    }

    #[test]
    fn add_trims_and_ignores_blank_names() {
        let mut wheel = Wheel::new(Vec::<&str>::new());
        assert!(wheel.add("   ").is_none());
        let first = wheel.add("  Zoe ").unwrap();
        let second = wheel.add("Zoe").unwrap();
        assert_ne!(first, second);
        assert_eq!(names(&wheel), vec!["Zoe", "Zoe"]);
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut wheel = Wheel::new(["A"]);
        assert!(wheel.remove(3).is_none());
        wheel.toggle_presence(3);
        assert_eq!(wheel.candidates().len(), 1);
        assert!(wheel.candidates()[0].present);
    }

    #[test]
    fn celebration_ends_on_request() {
        let mut wheel = Wheel::new(["A"]);
        wheel.spin_by(720.0).unwrap();
        wheel.settle();
        assert!(wheel.is_celebrating());
        wheel.end_celebration();
        assert!(!wheel.is_celebrating());
        assert_eq!(wheel.winner(), Some("A"));
    }

    #[test]
    fn rejected_spin_action_keeps_state() {
        let wheel = Rc::new(Wheel::new(Vec::<&str>::new()));
        let after = wheel.clone().reduce(WheelAction::Spin);
        assert!(Rc::ptr_eq(&wheel, &after));
    }
}
