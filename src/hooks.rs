use game_center::Schedule;
use gloo_timers::callback::{Interval, Timeout};
use yew::prelude::*;

/// Run `on_tick` every `period_ms` while `active` holds.
///
/// The interval lives in a [`Schedule`] stored in the component, so it is
/// cancelled as soon as `active` turns false or the component unmounts.
#[hook]
pub fn use_interval(label: &'static str, active: bool, period_ms: u32, on_tick: Callback<()>) {
    let slot = use_mut_ref(|| Schedule::<Interval>::new(label));

    use_effect_with(active, move |&active| {
        slot.borrow_mut().sync(active, || {
            Interval::new(period_ms, move || on_tick.emit(()))
        });
        // Runs before the next change of `active` and on unmount.
        move || {
            slot.borrow_mut().disarm();
        }
    });
}

/// Fire `on_fire` once, `delay_ms` after `armed` becomes true.
///
/// Turning `armed` false before the delay elapses cancels the timeout.
#[hook]
pub fn use_timeout(label: &'static str, armed: bool, delay_ms: u32, on_fire: Callback<()>) {
    let slot = use_mut_ref(|| Schedule::<Timeout>::new(label));

    use_effect_with(armed, move |&armed| {
        slot.borrow_mut().sync(armed, || {
            Timeout::new(delay_ms, move || on_fire.emit(()))
        });
        move || {
            slot.borrow_mut().disarm();
        }
    });
}
