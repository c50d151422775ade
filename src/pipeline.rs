use std::sync::mpsc::Sender;
use std::thread;

use crate::config::DashboardConfig;
use crate::widgets::{self, WidgetKind, WidgetOutput};

/// A finished widget job.
pub type WidgetResult = (WidgetKind, WidgetOutput);

/// Start one load → aggregate job per widget.
///
/// Jobs share nothing: each gets its own copy of `config`, reads its own
/// dataset and reports on `tx`, then calls `notify` so the UI can repaint.
/// A job whose thread cannot be spawned reports `Unavailable` right away.
pub fn render_dashboard<F>(config: &DashboardConfig, tx: &Sender<WidgetResult>, notify: F)
where
    F: Fn() + Clone + Send + 'static,
{
    for kind in WidgetKind::ALL {
        let job_config = config.clone();
        let job_tx = tx.clone();
        let job_notify = notify.clone();
        let spawned = thread::Builder::new()
            .name(format!("widget-{kind:?}"))
            .spawn(move || {
                log::debug!("{kind:?}: loading");
                let output = widgets::compute(kind, &job_config);
                log::debug!("{kind:?}: done");
                report(&job_tx, kind, output, &job_notify);
            });
        if let Err(e) = spawned {
            log::error!("{kind:?}: cannot start job: {e}");
            report(tx, kind, WidgetOutput::Unavailable, &notify);
        }
    }
}

/// Send a result and wake the UI. A closed receiver means the dashboard
/// was reloaded or closed; the result is dropped without a repaint.
fn report<F: Fn()>(tx: &Sender<WidgetResult>, kind: WidgetKind, output: WidgetOutput, notify: &F) {
    if tx.send((kind, output)).is_ok() {
        notify();
    }
}
