//! `widgetry dispatch`: feed JSON-lines messages through a host router.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use widgetry_host::{HostActionRouter, HostSettings, Notification, Submission};

/// What the router holds after every message has been fed through it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DispatchReport {
    pub(crate) received: usize,
    pub(crate) routed: usize,
    pub(crate) dropped: usize,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) settings: HostSettings,
    pub(crate) submissions: Vec<Submission>,
}

pub(crate) async fn run(router: &HostActionRouter, source: &Path) -> Result<DispatchReport, String> {
    let input = read_source(source)?;
    let mut received = 0;
    let mut routed = 0;
    for (line_no, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        received += 1;
        let raw: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "dropping unparseable message");
                continue;
            }
        };
        if router.receive(&raw).await.is_some() {
            routed += 1;
        }
    }
    Ok(DispatchReport {
        received,
        routed,
        dropped: received - routed,
        notifications: router.notifications().await,
        settings: router.settings().await,
        submissions: router.submissions().await,
    })
}

fn read_source(source: &Path) -> Result<String, String> {
    if source == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("error reading stdin: {}", e))?;
        return Ok(buf);
    }
    std::fs::read_to_string(source)
        .map_err(|e| format!("error reading file '{}': {}", source.display(), e))
}
