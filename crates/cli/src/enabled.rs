//! `facade enabled`: enablement decisions and settings per integration.

use std::process;

use facade_integrations::{Basis, EnablementDecision, Resolver};
use facade_message::Payload;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{print_json, report_error, OutputFormat};

#[derive(Debug, Serialize)]
struct IntegrationReport {
    integration: String,
    #[serde(flatten)]
    decision: EnablementDecision,
    settings: Option<Map<String, Value>>,
}

pub(crate) fn cmd_enabled(
    raw: &Value,
    integrations: &[String],
    resolver: Resolver,
    output: OutputFormat,
) {
    let payload = match Payload::new(raw) {
        Ok(p) => p.with_resolver(resolver),
        Err(e) => {
            report_error(&e.to_string(), output);
            process::exit(1);
        }
    };

    let reports: Vec<IntegrationReport> = integrations
        .iter()
        .map(|name| IntegrationReport {
            integration: name.clone(),
            decision: payload.decide(name.as_str()),
            settings: payload.context_for(name.as_str()),
        })
        .collect();

    match output {
        OutputFormat::Json => match serde_json::to_value(&reports) {
            Ok(v) => print_json(&v),
            Err(e) => {
                report_error(&format!("serialization error: {}", e), output);
                process::exit(1);
            }
        },
        OutputFormat::Text => {
            for report in &reports {
                let state = if report.decision.enabled {
                    "enabled"
                } else {
                    "disabled"
                };
                println!(
                    "{}: {} ({})",
                    report.integration,
                    state,
                    describe(report.decision.basis)
                );
                if let Some(settings) = report.settings.as_ref().filter(|s| !s.is_empty()) {
                    println!("  settings: {}", Value::Object(settings.clone()));
                }
            }
        }
    }
}

fn describe(basis: Basis) -> String {
    match basis {
        Basis::Explicit(source) => format!("explicit entry in {}", source),
        Basis::GlobalAll(source) => format!("all flag in {}", source),
        Basis::DisabledByDefault => "disabled by default".to_string(),
        Basis::Default => "default".to_string(),
    }
}
