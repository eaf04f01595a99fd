use anyhow::Result;
use quizdeck::application::{DeckBuilder, QuestionLoader, ShuffleMode};
use quizdeck::ports::{LatexPresenter, RenderOptions};
use quizdeck::util::testing::{write_fixture, RecordingCompiler};
use std::path::PathBuf;
use tempfile::TempDir;

/// Question documents used across the integration tests
#[allow(dead_code)]
pub mod decks {
    pub const FOUR_MULTIPLE_CHOICE: &str = r#"
capital:
  kind: mc
  text: What is the capital of Italy?
  options: [Milan, Rome, Naples, Turin]
  correct: 1
  curiosity: Rome has a country inside it.
planet:
  kind: multiple_choice
  text: Which planet is the largest?
  options: [Mars, Venus, Jupiter]
  correct: 2
ocean:
  kind: mc
  text: Which ocean is the deepest?
  options: [Pacific, Atlantic, Indian]
  correct: 0
metal:
  kind: mc
  text: Which metal is liquid at room temperature?
  options: [Iron, Mercury, Gold, Zinc]
  correct: 1
  difficulty: 1
"#;

    pub const TRUE_FALSE: &str = r#"
moon:
  kind: tf
  text: The Moon has its own light
  correct: 1
"#;

    pub const MIXED: &str = r#"
colours:
  kind: enum
  text: Name the colours of the Italian flag
  options: [green, white, red]
  curiosity: Adopted in 1797.
discount:
  kind: mc
  text: What is 50% of 10?
  options: ["5", "10", "20"]
  correct: 0
  curiosity: Per cent means per hundred, 100% is the whole.
boiling:
  kind: tf
  text: Water boils at 100 degrees at sea level
  correct: 0
  difficulty: 1
"#;

    pub const UNSUPPORTED_KIND: &str = r#"
fine:
  kind: mc
  text: Fine question
  options: [a, b]
  correct: 0
pairs:
  kind: matching
  text: Match the pairs
  options: [a, b]
"#;
}

/// A temporary workspace holding one question document
#[allow(dead_code)]
pub struct TestDeck {
    pub temp_dir: TempDir,
    pub input: PathBuf,
}

#[allow(dead_code)]
impl TestDeck {
    pub fn new(name: &str, content: &str) -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let input = write_fixture(temp_dir.path(), name, content)?;
        std::fs::create_dir(temp_dir.path().join("out"))?;
        Ok(Self { temp_dir, input })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    pub fn builder(&self, include_curiosity: bool) -> DeckBuilder<RecordingCompiler> {
        DeckBuilder::new(
            QuestionLoader::new(),
            LatexPresenter::new(RenderOptions {
                include_curiosity,
                ..Default::default()
            }),
            RecordingCompiler::new(),
        )
        .with_shuffle(ShuffleMode::Off)
    }
}

/// Split a rendered document into its card blocks.
#[allow(dead_code)]
pub fn card_blocks(document: &str) -> Vec<&str> {
    document.split("\\card\n").skip(1).collect()
}
