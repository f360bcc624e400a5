use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::classifier::{self, ClassifierAvailability, TrainingOutcome};
use crate::dataset::{self, Vocabulary};
use crate::playback::{Actuator, PlaybackExecutor, PlaybackMode, PlaybackSummary, VirtualRobot};
use crate::timeline::{AnimationPlan, TimelineBuilder};
use crate::transcript;

// @module: Application controller for the train / timeline / simulate workflows

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Train a model from a dataset and save it when training succeeds
    pub fn run_train(&self, data_path: &Path, model_path: &Path) -> Result<TrainingOutcome> {
        let rows = dataset::load_dataset(data_path)?;
        info!("Training on {} dataset rows", rows.len());

        let outcome = classifier::train_model(&rows, &self.config.training)
            .context("Training failed")?;

        match &outcome {
            TrainingOutcome::TooSmall { message } => {
                println!("{}", message);
            }
            TrainingOutcome::Trained { model, report } => {
                model.save(model_path)?;
                println!("[ok] model saved -> {}", model_path.display());
                println!("[acc] {:.3}", report.accuracy);
                println!("{}", report);
            }
        }

        Ok(outcome)
    }

    /// Build an animation plan from a transcript and save it to `out_path`
    pub fn run_timeline(
        &self,
        transcript_path: &Path,
        data_path: &Path,
        model_path: Option<&Path>,
        out_path: &Path,
    ) -> Result<AnimationPlan> {
        let rows = dataset::load_dataset(data_path)?;
        let vocabulary = Vocabulary::from_rows(&rows);
        info!("Vocabulary holds {} phrase(s)", vocabulary.len());

        let availability = classifier::load_classifier(model_path);
        match &availability {
            ClassifierAvailability::Ready(_) => info!("Using trained model for unmatched words"),
            ClassifierAvailability::NotConfigured => {
                info!("No model given, unmatched words get '{}'", self.config.timeline.fallback_gesture)
            }
            ClassifierAvailability::Unavailable { reason } => warn!(
                "Continuing without model ({}), unmatched words get '{}'",
                reason, self.config.timeline.fallback_gesture
            ),
        }

        let segments = transcript::load_transcript(transcript_path)?;
        let plan = TimelineBuilder::new(&vocabulary)
            .with_config(&self.config.timeline)
            .with_classifier(availability.as_classifier())
            .build(&segments)
            .context("Failed to build timeline")?;

        plan.save(out_path)?;
        info!(
            "Built {} event(s) from {} segment(s), spanning {:.2}s",
            plan.len(),
            segments.len(),
            plan.total_duration()
        );
        println!("[ok] animation plan -> {}", out_path.display());

        Ok(plan)
    }

    /// Load a plan and play it on the virtual robot
    pub async fn run_simulate(&self, plan_path: &Path, realtime: bool) -> Result<PlaybackSummary> {
        let plan = AnimationPlan::load(plan_path)?;
        if plan.is_empty() {
            println!("[Robot] Empty plan.");
        }
        self.play(&plan, VirtualRobot::new(), realtime || self.config.playback.realtime)
            .await
    }

    /// Play a plan on any actuator
    pub async fn play<A: Actuator>(&self, plan: &AnimationPlan, actuator: A, realtime: bool) -> Result<PlaybackSummary> {
        let mode = PlaybackMode::from_realtime_flag(realtime);
        info!("Playing {} event(s) ({:?})", plan.len(), mode);

        let mut executor = PlaybackExecutor::new(actuator, mode);
        let summary = executor.run(plan).await.context("Playback failed")?;
        Ok(summary)
    }
}
