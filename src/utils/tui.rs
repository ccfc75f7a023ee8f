use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let spinner = ProgressBar::new_spinner().with_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Await `future` with a spinner on screen, clearing it afterwards.
pub async fn spin_while<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = create_spinner(message);
    let output = future.await;
    spinner.finish_and_clear();
    output
}
