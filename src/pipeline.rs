//! Pipeline coordination for Castwright.
//!
//! Runs extraction, script generation, dialogue parsing, speech synthesis and
//! audio assembly one after another.

use crate::audio::{AudioAssembler, AudioClip, PodcastAudio, ScratchDir};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::script::{DialogueLine, OpenAIScriptWriter, Script, ScriptGenerator, ScriptWriter};
use crate::speech::{OpenAISpeechSynthesizer, SpeechSynthesizer, VoiceMap};
use indicatif::ProgressBar;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// What happened to one dialogue line during synthesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    /// Audio was produced and stored as a clip.
    Synthesized { index: usize, speaker: String },
    /// The line had no text after trimming.
    SkippedEmpty { index: usize, speaker: String },
    /// The speech service or the clip write failed; the line is left out.
    Failed {
        index: usize,
        speaker: String,
        text: String,
        error: String,
    },
}

/// Per-line results of the synthesis loop, in dialogue order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SynthesisReport {
    pub outcomes: Vec<LineOutcome>,
    pub clips: Vec<AudioClip>,
}

impl SynthesisReport {
    pub fn synthesized(&self) -> usize {
        self.clips.len()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LineOutcome::SkippedEmpty { .. }))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &LineOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LineOutcome::Failed { .. }))
    }
}

/// Result of a full podcast run.
#[derive(Debug, Serialize)]
pub struct PodcastReport {
    #[serde(skip)]
    pub script: Script,
    pub dialogue_lines: usize,
    pub synthesis: SynthesisReport,
    pub audio: PodcastAudio,
}

impl PodcastReport {
    /// Run summary as pretty-printed JSON. The script text is left out.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The main coordinator for the Castwright pipeline.
pub struct Podcaster {
    settings: Settings,
    generator: ScriptGenerator,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    assembler: AudioAssembler,
    progress: bool,
}

impl Podcaster {
    /// Create a podcaster backed by the OpenAI services.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        info!(
            "Using {} for the script and {} for speech",
            settings.script.model, settings.speech.model
        );

        let writer: Arc<dyn ScriptWriter> =
            Arc::new(OpenAIScriptWriter::with_config(&settings.script)?);
        let synthesizer: Arc<dyn SpeechSynthesizer> =
            Arc::new(OpenAISpeechSynthesizer::with_config(&settings.speech)?);

        Ok(Self::with_components(settings, prompts, writer, synthesizer))
    }

    /// Create a podcaster with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        writer: Arc<dyn ScriptWriter>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let assembler = AudioAssembler::new(settings.audio.reencode);

        Self {
            settings,
            generator: ScriptGenerator::new(writer, prompts),
            synthesizer,
            assembler,
            progress: false,
        }
    }

    /// Show a progress bar during synthesis.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generate the script for a document without synthesizing it.
    pub async fn generate_script(&self, input_file: Option<&Path>) -> Result<Script> {
        self.generator.generate(input_file).await
    }

    /// Run the whole pipeline and write the episode to `output_file`.
    #[instrument(skip(self), fields(output = %output_file.display()))]
    pub async fn run(&self, input_file: Option<&Path>, output_file: &Path) -> Result<PodcastReport> {
        info!("Generating podcast script");
        let script = self.generate_script(input_file).await?;
        self.produce(script, output_file).await
    }

    /// Synthesize and assemble an already generated script.
    pub async fn produce(&self, script: Script, output_file: &Path) -> Result<PodcastReport> {
        let dialogue = script.dialogue();
        info!("Parsed {} dialogue lines", dialogue.len());

        let mut scratch = ScratchDir::create_in(&self.settings.temp_dir())?;
        let voices = self.settings.speech.voice_map();

        let synthesis = self
            .synthesize_dialogue(&dialogue, &voices, &mut scratch)
            .await;

        let audio = self
            .assembler
            .assemble(&synthesis.clips, output_file, scratch.path())
            .await?;

        scratch.remove()?;

        Ok(PodcastReport {
            script,
            dialogue_lines: dialogue.len(),
            synthesis,
            audio,
        })
    }

    /// Synthesize each line in order, continuing past per-line failures.
    pub async fn synthesize_dialogue(
        &self,
        dialogue: &[DialogueLine],
        voices: &VoiceMap,
        scratch: &mut ScratchDir,
    ) -> SynthesisReport {
        let pb = if self.progress {
            crate::cli::Output::progress_bar(dialogue.len() as u64, "Synthesizing")
        } else {
            ProgressBar::hidden()
        };

        let mut report = SynthesisReport::default();

        for (index, line) in dialogue.iter().enumerate() {
            pb.inc(1);

            if line.text.trim().is_empty() {
                report.outcomes.push(LineOutcome::SkippedEmpty {
                    index,
                    speaker: line.speaker.clone(),
                });
                continue;
            }

            let voice = voices.voice_for(&line.speaker);
            let result = match self.synthesizer.synthesize(&line.text, voice).await {
                Ok(audio) => scratch.write_clip(index, &line.speaker, &audio).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(clip) => {
                    report.clips.push(clip);
                    report.outcomes.push(LineOutcome::Synthesized {
                        index,
                        speaker: line.speaker.clone(),
                    });
                }
                Err(e) => {
                    pb.suspend(|| {
                        warn!("Error generating audio for line '{}': {}", line.text, e);
                    });
                    report.outcomes.push(LineOutcome::Failed {
                        index,
                        speaker: line.speaker.clone(),
                        text: line.text.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        pb.finish_and_clear();
        report
    }
}
