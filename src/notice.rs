//! Blocking notices shown through the browser's `alert` dialog.

use log::warn;

/// Tell the user something went wrong and wait until they dismiss it.
pub fn show_notice(message: &str) {
    warn!("{}", message);
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        warn!("Could not show notice: {:?}", e);
    }
}
