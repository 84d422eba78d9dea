use crate::backend::Prediction;
use crate::commands::command::Command;
use crate::core::prelude::*;
use crate::view::Page;
use std::path::Path;

#[derive(Debug, Default)]
pub struct PredictCommand;

impl PredictCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn render(page: &Page, prediction: &Prediction) -> String {
        format!(
            "{}: {}\n{}: {:.2}%\n{}: {}",
            page.tr("predict.disease", "Disease", &[]),
            prediction.disease,
            page.tr("predict.confidence", "Confidence", &[]),
            prediction.confidence * 100.0,
            page.tr("predict.solution", "Solution", &[]),
            prediction.solution
        )
    }
}

#[async_trait::async_trait]
impl Command for PredictCommand {
    fn name(&self) -> &'static str {
        "predict"
    }

    fn description(&self) -> &'static str {
        "Detect plant disease from a leaf image (predict <image>)"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "predict" | "detect")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        let Some(path) = args.first().map(Path::new) else {
            return Err(AppError::Validation("Usage: predict <image>".to_string()));
        };

        let image = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        match page.backend().predict(image, &file_name).await {
            Ok(prediction) => Ok(Self::render(page, &prediction)),
            Err(e) => {
                log::error!("Prediction failed: {}", e);
                Ok(page.tr("predict.failed", "Could not analyze image", &[]))
            }
        }
    }

    fn priority(&self) -> u8 {
        45
    }
}
