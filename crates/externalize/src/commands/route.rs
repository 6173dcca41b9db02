use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use externalize_core::{Payload, Settings};
use externalize_dispatch::{Externalizer, JsonLinesSink};

use crate::inbound::{encode_body, InboundEvent};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub events: usize,
    pub externalized: usize,
}

pub fn run(settings_path: &Path, input: Option<&Path>) -> anyhow::Result<()> {
    let settings = Settings::load(settings_path)?;
    let stdout = std::io::stdout();

    let summary = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            route(&settings, BufReader::new(file), stdout)?
        }
        None => route(&settings, std::io::stdin().lock(), stdout)?,
    };

    tracing::info!(
        events = summary.events,
        externalized = summary.externalized,
        "Routing complete"
    );
    Ok(())
}

/// Dispatches every JSON line of `input`, writing routed records to `output`
pub fn route<R, W>(settings: &Settings, input: R, output: W) -> anyhow::Result<Summary>
where
    R: BufRead,
    W: Write + Send,
{
    let configuration = settings.to_configuration()?;
    let externalizer = Externalizer::new(
        configuration,
        JsonLinesSink::with_encoder(output, encode_body),
    );

    let mut summary = Summary::default();
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: InboundEvent = serde_json::from_str(&line)
            .with_context(|| format!("malformed event on line {}", index + 1))?;
        let event: Payload = Arc::new(event);
        summary.events += 1;

        if externalizer.externalize(&event)? {
            summary.externalized += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn settings() -> Settings {
        Settings::from_json_str(
            r#"{
                "namespaces": ["acme::shop"],
                "declarations": {
                    "acme::shop::orders::OrderPlaced": "orders.placed",
                    "acme::shop::cart::CartCleared": ""
                }
            }"#,
        )
        .unwrap()
    }

    fn routed(output: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8(output.to_vec())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_route_declared_events() {
        let input = Cursor::new(
            [
                r#"{"type": "acme::shop::orders::OrderPlaced", "body": {"id": 1}}"#,
                "",
                r#"{"type": "acme::shop::cart::CartCleared", "body": {"cart": 7}}"#,
                r#"{"type": "acme::shop::cart::CartViewed"}"#,
                r#"{"type": "other::orders::OrderPlaced"}"#,
            ]
            .join("\n"),
        );
        let mut output = Vec::new();

        let summary = route(&settings(), input, &mut output).unwrap();

        assert_eq!(
            summary,
            Summary {
                events: 4,
                externalized: 2
            }
        );
        let records = routed(&output);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["target"], "orders.placed");
        assert_eq!(records[0]["payload"]["id"], 1);
        assert_eq!(records[1]["target"], "cart::CartCleared");
        assert_eq!(records[1]["payload"]["cart"], 7);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = Cursor::new("{\"type\": \"acme::shop::Ok\"}\nnot json\n");
        let mut output = Vec::new();

        let err = route(&settings(), input, &mut output).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_run_reports_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings_path = dir.path().join("settings.json");
        std::fs::write(&settings_path, r#"{"namespaces": ["acme::shop"]}"#).unwrap();

        let err = run(&settings_path, Some(&dir.path().join("events.jsonl"))).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
