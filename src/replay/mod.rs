//! Replay - Scripted Page Sessions
//!
//! Builds a page from a [`Fixture`], loads the behaviors through a
//! [`VirtualHost`] and plays the fixture's actions. The result is a
//! [`ReplayReport`] with the final DOM outline and the host trace.
//!
//! [`run`] jumps the virtual clock; [`run_realtime`] sleeps between timer
//! ticks so a session takes as long as it would in a browser.

mod fixture;

pub use fixture::{Action, Fixture};

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::{Site, VirtualHost};
use crate::dom::Dom;
use crate::domain::config::SiteConfig;
use crate::error::Result;
use crate::helpers::TraceEntry;
use crate::storage::PreferenceStore;

/// Final state of a replayed session
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// Virtual time at the end of the session
    pub elapsed: Duration,
    pub scroll_y: f64,
    pub document_lang: Option<String>,
    pub active_timers: usize,
    pub outline: String,
    pub trace: Vec<TraceEntry>,
    pub trace_dropped: usize,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== trace ==")?;
        if self.trace_dropped > 0 {
            writeln!(f, "({} earlier entries dropped)", self.trace_dropped)?;
        }
        for entry in &self.trace {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "== page ==")?;
        writeln!(
            f,
            "elapsed {}ms, scroll {}, lang {}, running timers {}",
            self.elapsed.as_millis(),
            self.scroll_y,
            self.document_lang.as_deref().unwrap_or("-"),
            self.active_timers,
        )?;
        write!(f, "{}", self.outline)
    }
}

/// Store the session reads its locale from: `store` when given, otherwise
/// the fixture's pre-persisted locale
fn session_store(
    fixture: &Fixture,
    config: &SiteConfig,
    store: Option<Box<dyn PreferenceStore>>,
) -> Box<dyn PreferenceStore> {
    match store {
        Some(store) => store,
        None => Box::new(fixture.store(&config.locale.storage_key)),
    }
}

fn start(
    fixture: &Fixture,
    config: &SiteConfig,
    store: Option<Box<dyn PreferenceStore>>,
) -> VirtualHost {
    let store = session_store(fixture, config, store);
    let site = Site::new(fixture.dom(), config.clone(), store);
    let mut host = VirtualHost::new(site);
    host.load();
    host
}

fn apply_action(host: &mut VirtualHost, action: &Action) -> Result<()> {
    match action {
        Action::Click { target } => {
            let selector = Fixture::selector(target)?;
            if host.click_selector(&selector).is_none() {
                warn!(%target, "Click target not on page");
            }
        }
        Action::Scroll { y } => host.scroll_to(*y),
        Action::Advance { ms } => host.advance(Duration::from_millis(*ms)),
    }
    Ok(())
}

fn report(host: &VirtualHost) -> ReplayReport {
    let dom = host.dom();
    ReplayReport {
        elapsed: host.now(),
        scroll_y: dom.scroll_y(),
        document_lang: dom.document_lang(),
        active_timers: host.active_timers(),
        outline: dom.outline(),
        trace: host.trace().entries().cloned().collect(),
        trace_dropped: host.trace().dropped(),
    }
}

/// Replay on the virtual clock
pub fn run(
    fixture: &Fixture,
    config: &SiteConfig,
    store: Option<Box<dyn PreferenceStore>>,
) -> Result<ReplayReport> {
    let mut host = start(fixture, config, store);
    for action in &fixture.actions {
        apply_action(&mut host, action)?;
    }
    info!(elapsed_ms = host.now().as_millis() as u64, "Replay finished");
    Ok(report(&host))
}

/// Replay with wall-clock pacing: every timer tick inside an `advance`
/// waits for its due time
pub async fn run_realtime(
    fixture: &Fixture,
    config: &SiteConfig,
    store: Option<Box<dyn PreferenceStore>>,
) -> Result<ReplayReport> {
    let mut host = start(fixture, config, store);
    for action in &fixture.actions {
        let Action::Advance { ms } = action else {
            apply_action(&mut host, action)?;
            continue;
        };

        let until = host.now() + Duration::from_millis(*ms);
        while let Some(due) = host.next_due().filter(|due| *due <= until) {
            let wait = due.saturating_sub(host.now());
            tokio::time::sleep(wait).await;
            host.advance(wait);
        }
        let rest = until.saturating_sub(host.now());
        tokio::time::sleep(rest).await;
        host.advance(rest);
    }
    info!(elapsed_ms = host.now().as_millis() as u64, "Realtime replay finished");
    Ok(report(&host))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r##"{
        "viewport_height": 600,
        "body": [
            { "tag": "nav", "classes": ["navbar"], "top": 0, "height": 70, "children": [
                { "tag": "button", "id": "langBtn", "children": [
                    { "tag": "span", "id": "currentLang", "text": "English" }
                ]},
                { "tag": "h1", "attributes": { "data-zh": "你好", "data-en": "Hello" }, "text": "你好" }
            ]},
            { "tag": "div", "classes": ["stat-number"], "text": "150+", "top": 900, "height": 40 }
        ],
        "actions": [
            { "action": "click", "target": "#langBtn" },
            { "action": "scroll", "y": 500 },
            { "action": "advance", "ms": 2500 }
        ]
    }"##;

    #[test]
    fn replay_reports_final_page() {
        let fixture = Fixture::from_json(FIXTURE).expect("fixture");
        let report = run(&fixture, &SiteConfig::default(), None).expect("replay");

        assert_eq!(report.document_lang.as_deref(), Some("en"));
        assert_eq!(report.scroll_y, 340.0);
        assert_eq!(report.active_timers, 0);
        assert_eq!(report.elapsed, Duration::from_millis(2500));
        assert!(report.outline.contains("<h1> Hello"));
        assert!(report.outline.contains("<div.stat-number> 150+"));
        assert!(report.outline.contains("<nav.navbar.scrolled>"));
        assert!(report.trace.iter().any(|e| e.message == "click #langBtn"));
        assert!(report.to_string().contains("== page =="));
    }

    #[test]
    fn missing_click_target_is_not_an_error() {
        let fixture = Fixture::from_json(
            r#"{ "actions": [{ "action": "click", "target": ".hamburger" }] }"#,
        )
        .expect("fixture");
        let report = run(&fixture, &SiteConfig::default(), None).expect("replay");
        assert_eq!(report.document_lang.as_deref(), Some("zh-CN"));
    }

    #[tokio::test]
    async fn realtime_replay_paces_timers() {
        let fixture = Fixture::from_json(
            r#"{
                "body": [{ "tag": "div", "classes": ["stat-number"], "text": "7", "top": 10, "height": 20 }],
                "actions": [{ "action": "advance", "ms": 60 }]
            }"#,
        )
        .expect("fixture");

        let mut config = SiteConfig::default();
        config.counter.duration_ms = 40;
        config.counter.tick_ms = 10;

        let started = std::time::Instant::now();
        let report = run_realtime(&fixture, &config, None).await.expect("replay");

        assert!(started.elapsed() >= Duration::from_millis(60));
        assert_eq!(report.elapsed, Duration::from_millis(60));
        assert_eq!(report.active_timers, 0);
        assert!(report.outline.contains("<div.stat-number> 7"));
    }
}
