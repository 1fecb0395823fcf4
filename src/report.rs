//! Human-readable status output for the CLI.
//!
//! Everything here is written to stderr so enhanced audio can go to stdout.

use crate::audio::inspect::Inspection;
use crate::enhance::pipeline::Metrics;
use owo_colors::OwoColorize;

/// RMS level in dBFS, or negative infinity for silence.
pub fn rms_dbfs(rms: f64) -> f64 {
    if rms > 0.0 {
        20.0 * rms.log10()
    } else {
        f64::NEG_INFINITY
    }
}

fn level(rms: f64) -> String {
    let db = rms_dbfs(rms);
    if db.is_finite() {
        format!("{rms:.4} ({db:.1} dBFS)")
    } else {
        format!("{rms:.4} (silence)")
    }
}

fn label(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Summary of one enhancement run.
pub fn format_metrics(metrics: &Metrics, engine: &str, color: bool) -> String {
    let mut lines = vec![format!(
        "{} {} ({} Hz, {} ch, {:.2}s, {} samples)",
        label("Engine:", color),
        engine,
        metrics.sample_rate,
        metrics.channels,
        metrics.duration_secs,
        metrics.sample_count
    )];
    lines.push(format!("  {} {}", label("before:", color), level(metrics.rms_before)));
    for stage in &metrics.stages {
        lines.push(format!("  {:<15} {}", format!("{}:", stage.stage), level(stage.rms)));
    }
    let after = level(metrics.rms_after);
    let after = if color { after.green().to_string() } else { after };
    lines.push(format!("  {} {}", label("after:", color), after));
    lines.join("\n")
}

/// Report for the `inspect` command.
pub fn format_inspection(report: &Inspection, color: bool) -> String {
    let level_text = report.rms.map_or_else(|| "n/a".to_string(), level);
    let mut lines = vec![
        format!("{}   {}", label("Format:", color), report.format),
        format!("{}     {} bytes", label("Data:", color), report.data_bytes),
        format!("{} {:.3}s", label("Duration:", color), report.duration_secs),
        format!("{}    {}", label("Level:", color), level_text),
    ];
    if !report.processable {
        let note = "cannot be enhanced: only 16-bit PCM with an even data size is supported";
        lines.push(if color { note.yellow().to_string() } else { note.to_string() });
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::format::AudioFormat;
    use crate::enhance::pipeline::StageLevel;

    fn metrics() -> Metrics {
        Metrics {
            rms_before: 0.05,
            rms_after: 0.7,
            duration_secs: 1.5,
            sample_rate: 22050,
            channels: 1,
            sample_count: 33075,
            stages: vec![
                StageLevel {
                    stage: "high-pass".to_string(),
                    rms: 0.045,
                },
                StageLevel {
                    stage: "normalize".to_string(),
                    rms: 0.7,
                },
            ],
        }
    }

    #[test]
    fn dbfs_of_common_levels() {
        assert!((rms_dbfs(1.0)).abs() < 1e-12);
        assert!((rms_dbfs(0.5) + 6.0206).abs() < 1e-3);
        assert_eq!(rms_dbfs(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn metrics_report_lists_stages_in_order() {
        let text = format_metrics(&metrics(), "native", false);
        let hp = text.find("high-pass:").unwrap();
        let norm = text.find("normalize:").unwrap();
        assert!(hp < norm);
        assert!(text.starts_with("Engine: native (22050 Hz, 1 ch, 1.50s, 33075 samples)"));
        assert!(text.contains("after: 0.7000 (-3.1 dBFS)"), "{text}");
    }

    #[test]
    fn plain_report_has_no_escape_codes() {
        assert!(!format_metrics(&metrics(), "native", false).contains('\x1b'));
    }

    #[test]
    fn inspection_report_flags_unsupported_depth() {
        let report = Inspection {
            format: AudioFormat {
                sample_rate: 44100,
                channels: 2,
                bits_per_sample: 24,
            },
            data_bytes: 600,
            duration_secs: 0.0,
            rms: None,
            processable: false,
        };
        let text = format_inspection(&report, false);
        assert!(text.contains("44100 Hz stereo 24-bit"));
        assert!(text.contains("n/a"));
        assert!(text.contains("only 16-bit PCM"));
    }

    #[test]
    fn silent_level_is_labelled() {
        assert_eq!(level(0.0), "0.0000 (silence)");
    }
}
