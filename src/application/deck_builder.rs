// src/application/deck_builder.rs
use crate::application::card_builder::build_cards;
use crate::application::loader::QuestionLoader;
use crate::application::shuffler::shuffle_deck;
use crate::constants::DOCUMENT_EXTENSION;
use crate::domain::{Card, DeckError};
use crate::ports::LatexPresenter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Turns generated document text into the final artifact at `output_path`.
pub trait DocumentCompiler {
    fn compile(&self, document: &str, output_path: &Path) -> Result<(), DeckError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleMode {
    /// Keep the authored option order.
    Off,
    /// Reproducible order from a fixed seed.
    Seeded(u64),
    /// Fresh order on every run.
    Random,
}

/// Decision returned by the hook that sees a deck right before compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Compile,
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_path: PathBuf,
    pub cards: Vec<Card>,
}

/// Runs the load, build, shuffle, render and compile stages for one deck.
pub struct DeckBuilder<C: DocumentCompiler> {
    loader: QuestionLoader,
    presenter: LatexPresenter,
    compiler: C,
    shuffle: ShuffleMode,
}

impl<C: DocumentCompiler> DeckBuilder<C> {
    pub fn new(loader: QuestionLoader, presenter: LatexPresenter, compiler: C) -> Self {
        Self {
            loader,
            presenter,
            compiler,
            shuffle: ShuffleMode::Random,
        }
    }

    pub fn with_shuffle(mut self, shuffle: ShuffleMode) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Load the question file and turn it into cards, shuffled per the mode.
    #[instrument(level = "debug", skip(self))]
    pub fn prepare_cards(&self, input: &Path) -> Result<Vec<Card>, DeckError> {
        let records = self.loader.load_file(input)?;
        let mut cards = build_cards(records)?;

        match self.shuffle {
            ShuffleMode::Off => debug!("Shuffling disabled"),
            ShuffleMode::Seeded(seed) => shuffle_deck(&mut cards, &mut StdRng::seed_from_u64(seed)),
            ShuffleMode::Random => shuffle_deck(&mut cards, &mut rand::rng()),
        }

        Ok(cards)
    }

    pub fn render(&self, cards: &[Card]) -> String {
        self.presenter.render(cards)
    }

    pub fn compile(&self, document: &str, output_path: &Path) -> Result<(), DeckError> {
        self.compiler.compile(document, output_path)
    }

    /// Full pipeline from question file to compiled deck.
    pub fn build(&self, input: &Path, output_dir: &Path) -> Result<BuildReport, DeckError> {
        let cards = self.prepare_cards(input)?;
        let document = self.render(&cards);
        self.compile_deck(input, output_dir, cards, &document)
    }

    /// Like [`build`](Self::build), but hands the cards and the rendered
    /// document to `before_compile` first. Returns `None` when the hook stops
    /// the build.
    pub fn build_with<F, E>(
        &self,
        input: &Path,
        output_dir: &Path,
        before_compile: F,
    ) -> Result<Option<BuildReport>, E>
    where
        F: FnOnce(&[Card], &str) -> Result<BuildStep, E>,
        E: From<DeckError>,
    {
        let cards = self.prepare_cards(input)?;
        let document = self.render(&cards);

        if before_compile(&cards, &document)? == BuildStep::Stop {
            debug!("Build stopped before compilation");
            return Ok(None);
        }

        Ok(Some(self.compile_deck(input, output_dir, cards, &document)?))
    }

    fn compile_deck(
        &self,
        input: &Path,
        output_dir: &Path,
        cards: Vec<Card>,
        document: &str,
    ) -> Result<BuildReport, DeckError> {
        let output_path = output_path_for(input, output_dir);

        self.compile(document, &output_path)?;
        info!(path = %output_path.display(), cards = cards.len(), "Deck written");

        Ok(BuildReport { output_path, cards })
    }

    /// Compile a sheet of card backs for `image`.
    pub fn build_backs(&self, image: &Path, output_dir: &Path) -> Result<PathBuf, DeckError> {
        if !image.is_file() {
            return Err(DeckError::io(
                image,
                std::io::Error::new(std::io::ErrorKind::NotFound, "image file not found"),
            ));
        }
        let absolute = std::path::absolute(image).map_err(|e| DeckError::io(image, e))?;
        let document = self.presenter.render_backs(&absolute);
        let output_path = output_path_for(image, output_dir);

        self.compile(&document, &output_path)?;
        info!(path = %output_path.display(), "Card backs written");

        Ok(output_path)
    }
}

/// `<output_dir>/<input stem>.pdf`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    output_dir.join(format!("{stem}.{DOCUMENT_EXTENSION}"))
}
