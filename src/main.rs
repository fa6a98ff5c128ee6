//! Main module for the Game Center application using Yew.
//! Wires the simulation core to timers, user input and the view components.

use game_center::defaults::{CELEBRATION_MS, COUNTDOWN_TICK_MS, RACE_TICK_MS, SETTLE_DELAY_MS};
use game_center::{
    read_racers_from_csv_string, Countdown, CountdownAction, Race, RaceAction, Racer, SpinError,
    Wheel, WheelAction,
};
use log::error;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod logging;
mod notice;

use components::{Confetti, Lane, RaceResults, Roster, TimerPanel, WheelFace};
use config::*;
use hooks::{use_interval, use_timeout};
use notice::show_notice;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

fn default_field() -> Vec<Racer> {
    read_racers_from_csv_string(HORSES_CSV).unwrap_or_else(|e| {
        error!("Failed to load the race field: {}", e);
        Vec::new()
    })
}

/// Turn a reducer dispatcher into a unit callback for a timer.
fn dispatch_on<T: Reducible + 'static>(
    dispatcher: UseReducerDispatcher<T>,
    action: fn() -> T::Action,
) -> Callback<()> {
    Callback::from(move |_| dispatcher.dispatch(action()))
}

// ──────────────────────────────────────────────────────────────────────────────

#[function_component(HorseRacing)]
fn horse_racing() -> Html {
    let race = use_reducer(|| Race::new(default_field()));

    use_interval(
        "race tick",
        race.is_active(),
        RACE_TICK_MS,
        dispatch_on(race.dispatcher(), || RaceAction::Tick),
    );

    let start = {
        let dispatcher = race.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(RaceAction::Start))
    };

    let standings: Vec<(usize, String)> = race
        .standings()
        .map(|(place, racer)| (place, racer.name.clone()))
        .collect();

    html! {
        <div class="card">
            <h2>{ "Horse Racing Game" }</h2>
            <div class="lanes">
                { race.racers().iter().map(|r| html! {
                    <Lane key={r.name.clone()} name={r.name.clone()} color={r.color.clone()} progress={r.progress} />
                }).collect::<Html>() }
            </div>
            <button class="btn btn-wide" onclick={start} disabled={race.is_active()}>
                { if race.is_active() { "Race in Progress..." } else { "Start Race" } }
            </button>
            if race.is_over() {
                <RaceResults {standings} elapsed_ms={race.elapsed_ms()} />
            }
        </div>
    }
}

#[function_component(SpinningWheel)]
fn spinning_wheel() -> Html {
    let wheel = use_reducer(Wheel::default);
    let timer = use_reducer(Countdown::default);

    use_interval(
        "countdown",
        timer.is_running(),
        COUNTDOWN_TICK_MS,
        dispatch_on(timer.dispatcher(), || CountdownAction::Tick),
    );
    use_timeout(
        "wheel settle",
        wheel.is_spinning(),
        SETTLE_DELAY_MS,
        dispatch_on(wheel.dispatcher(), || WheelAction::Settle),
    );
    use_timeout(
        "celebration",
        wheel.is_celebrating(),
        CELEBRATION_MS,
        dispatch_on(wheel.dispatcher(), || WheelAction::EndCelebration),
    );

    let spin = {
        let wheel = wheel.clone();
        let timer = timer.dispatcher();
        Callback::from(move |_: MouseEvent| match wheel.can_spin() {
            Ok(()) => {
                wheel.dispatch(WheelAction::Spin);
                timer.dispatch(CountdownAction::Start);
            }
            // The button is disabled while spinning; a double click can still land here.
            Err(SpinError::AlreadySpinning) => {}
            Err(e) => show_notice(&e.to_string()),
        })
    };
    let reset_selections = {
        let dispatcher = wheel.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(WheelAction::ResetSelections))
    };

    let wheel_actions = wheel.dispatcher();
    let on_toggle = {
        let d = wheel_actions.clone();
        Callback::from(move |index| d.dispatch(WheelAction::TogglePresence(index)))
    };
    let on_remove = {
        let d = wheel_actions.clone();
        Callback::from(move |index| d.dispatch(WheelAction::Remove(index)))
    };
    let on_add = Callback::from(move |name| wheel_actions.dispatch(WheelAction::Add(name)));

    let timer_actions = timer.dispatcher();
    let on_minutes = {
        let d = timer_actions.clone();
        Callback::from(move |text| d.dispatch(CountdownAction::Configure(text)))
    };
    let on_toggle_timer = dispatch_on(timer_actions.clone(), || CountdownAction::Toggle);
    let on_reset_timer = dispatch_on(timer_actions, || CountdownAction::Reset);

    html! {
        <div class="wheel-game">
            <Confetti active={wheel.is_celebrating()} />

            <TimerPanel
                configured_minutes={timer.configured_minutes()}
                display={timer.display()}
                running={timer.is_running()}
                {on_minutes}
                on_toggle={on_toggle_timer}
                on_reset={on_reset_timer}
            />

            <WheelFace slices={wheel.slices()} rotation={wheel.rotation()} settle_ms={SETTLE_DELAY_MS} />

            <div class="wheel-controls">
                <button class="btn btn-go" onclick={spin} disabled={wheel.is_spinning()}>
                    { if wheel.is_spinning() { "Spinning..." } else { "Spin the Wheel" } }
                </button>
                <button class="btn btn-reset" onclick={reset_selections}>{ "Reset Selections" }</button>
            </div>

            if let Some(name) = wheel.winner() {
                <div class="winner">{ format!("Selected: {}", name) }</div>
            }

            <Roster candidates={wheel.candidates().to_vec()} {on_toggle} {on_remove} {on_add} />
        </div>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Game {
    Horses,
    Wheel,
}

impl Game {
    fn label(self) -> &'static str {
        match self {
            Game::Horses => "Horse Racing",
            Game::Wheel => "Spinning Wheel",
        }
    }
}

/// Top-level selector; mounts at most one game at a time.
#[function_component]
pub fn App() -> Html {
    let current = use_state(|| None::<Game>);

    let nav_button = |game: Game| {
        let current_handle = current.clone();
        let onclick = Callback::from(move |_: MouseEvent| current_handle.set(Some(game)));
        let active = *current == Some(game);
        html! {
            <button class={classes!("nav-btn", active.then_some("nav-active"))} {onclick}>
                { game.label() }
            </button>
        }
    };

    html! {
        <div class="app">
            <nav class="nav">
                { nav_button(Game::Horses) }
                { nav_button(Game::Wheel) }
            </nav>
            {
                match *current {
                    Some(Game::Horses) => html! { <HorseRacing /> },
                    Some(Game::Wheel) => html! { <SpinningWheel /> },
                    None => html! {
                        <div class="welcome">
                            <h1>{ WELCOME_TITLE }</h1>
                            <p>{ WELCOME_HINT }</p>
                        </div>
                    },
                }
            }
        </div>
    }
}

/// Entry point: installs panic and log hooks, then renders the App.
fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    yew::Renderer::<App>::new().render();
}
