//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SaffronArgs};
use crate::engine::{EngineStatus, PersistStatus, TrainReport, TrainStatus};
use crate::error::Result;

/// Result of a read command (search, related, recommend).
#[derive(Debug, Serialize, Deserialize)]
pub struct IdList {
    /// False when the model needed for the command is not trained.
    pub trained: bool,
    pub ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scores: Option<Vec<f64>>,
}

/// Rendering of a result for people.
pub trait HumanOutput {
    fn human(&self) -> String;
}

impl HumanOutput for IdList {
    fn human(&self) -> String {
        if !self.trained {
            return "model not trained".to_string();
        }
        if self.ids.is_empty() {
            return "no results".to_string();
        }
        let mut out = String::new();
        match &self.scores {
            Some(scores) => {
                for (id, score) in self.ids.iter().zip(scores) {
                    let _ = writeln!(out, "{id}\t{score:.4}");
                }
            }
            None => {
                for id in &self.ids {
                    let _ = writeln!(out, "{id}");
                }
            }
        }
        out.trim_end().to_string()
    }
}

impl HumanOutput for TrainReport {
    fn human(&self) -> String {
        let training = match &self.training {
            TrainStatus::Trained { rows, vocabulary } => {
                format!("trained on {rows} rows, {vocabulary} terms")
            }
            TrainStatus::Skipped { reason } => format!("training skipped: {reason}"),
        };
        let persistence = match &self.persistence {
            PersistStatus::Saved => "saved".to_string(),
            PersistStatus::Disabled => "not saved (no data directory)".to_string(),
            PersistStatus::Failed { reason } => format!("save failed: {reason}"),
            PersistStatus::NotAttempted => "nothing saved".to_string(),
        };
        format!("{training}\n{persistence}")
    }
}

impl HumanOutput for EngineStatus {
    fn human(&self) -> String {
        let search = match &self.search {
            Some(s) => format!(
                "search: {} products, {} terms, trained {} ({})",
                s.documents,
                s.vocabulary,
                s.trained_at.to_rfc3339(),
                s.generation
            ),
            None => "search: not trained".to_string(),
        };
        let recommend = match &self.recommend {
            Some(r) => format!(
                "recommend: {} categories, {} terms, trained {} ({})",
                r.classes.len(),
                r.vocabulary,
                r.trained_at.to_rfc3339(),
                r.generation
            ),
            None => "recommend: not trained".to_string(),
        };
        let persistence = if self.persistence {
            "persistence: enabled"
        } else {
            "persistence: disabled"
        };
        format!("{search}\n{recommend}\n{persistence}")
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(result: &T, args: &SaffronArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{}", result.human());
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SaffronArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_list_human() {
        let list = IdList {
            trained: true,
            ids: vec![3, 1],
            scores: Some(vec![0.9, 0.25]),
        };
        assert_eq!(list.human(), "3\t0.9000\n1\t0.2500");

        let untrained = IdList {
            trained: false,
            ids: vec![],
            scores: None,
        };
        assert_eq!(untrained.human(), "model not trained");
    }

    #[test]
    fn test_id_list_json_omits_missing_scores() {
        let list = IdList {
            trained: true,
            ids: vec![1],
            scores: None,
        };
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"{"trained":true,"ids":[1]}"#
        );
    }

    #[test]
    fn test_train_report_human() {
        let report = TrainReport {
            training: TrainStatus::Trained {
                rows: 2,
                vocabulary: 8,
            },
            persistence: PersistStatus::Disabled,
        };
        assert_eq!(
            report.human(),
            "trained on 2 rows, 8 terms\nnot saved (no data directory)"
        );
    }
}
