mod helpers;

use anyhow::Result;
use helpers::{card_blocks, decks, TestDeck};
use quizdeck::application::{DeckBuilder, QuestionLoader, ShuffleMode};
use quizdeck::constants::ROW_BREAK;
use quizdeck::domain::DeckError;
use quizdeck::ports::LatexPresenter;
use quizdeck::util::testing::{RecordingCompiler, FAKE_ARTIFACT};

#[test]
fn given_four_multiple_choice_questions_when_building_then_renders_four_cards_with_one_row_break() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("geography.yaml", decks::FOUR_MULTIPLE_CHOICE)?;
    let builder = deck.builder(false);

    // Act
    let report = builder.build(&deck.input, &deck.output_dir())?;

    // Assert
    let calls = builder.compiler().calls();
    assert_eq!(calls.len(), 1);
    let blocks = card_blocks(&calls[0].0);
    assert_eq!(blocks.len(), 4);
    assert!(blocks[2].contains(ROW_BREAK), "row break after the third card");
    assert!(!blocks[3].contains(ROW_BREAK), "no row break after the fourth card");
    assert_eq!(calls[0].0.matches(ROW_BREAK).count(), 1);

    for (block, card) in blocks.iter().zip(&report.cards) {
        assert_eq!(block.matches(r"\bfseries").count(), 1);
        let answer = card.body.correct_option().unwrap();
        assert!(block.contains(&format!(r"\bfseries \item {answer}\mdseries")));
        assert!(block.contains(r"\begin{enumerate}[A),leftmargin=*]"));
    }
    Ok(())
}

#[test]
fn given_four_questions_when_building_then_writes_pdf_named_after_input() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("geography.yaml", decks::FOUR_MULTIPLE_CHOICE)?;

    // Act
    let report = deck.builder(false).build(&deck.input, &deck.output_dir())?;

    // Assert
    assert_eq!(report.output_path, deck.output_dir().join("geography.pdf"));
    assert_eq!(std::fs::read(&report.output_path)?, FAKE_ARTIFACT);
    Ok(())
}

#[test]
fn given_true_false_with_second_label_correct_when_rendering_then_marks_falso() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("tf.yaml", decks::TRUE_FALSE)?;
    let builder = deck.builder(false).with_shuffle(ShuffleMode::Seeded(17));

    // Act
    let cards = builder.prepare_cards(&deck.input)?;
    let document = builder.render(&cards);

    // Assert
    let block = card_blocks(&document)[0];
    let items: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| line.contains(r"\item "))
        .collect();
    assert_eq!(items, vec![r"\item Vero", r"\bfseries \item Falso\mdseries"]);
    assert!(block.contains(r"\begin{itemize}[leftmargin=*]"));
    Ok(())
}

#[test]
fn given_unsupported_kind_when_building_then_aborts_without_output() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("broken.yaml", decks::UNSUPPORTED_KIND)?;
    let builder = deck.builder(false);

    // Act
    let result = builder.build(&deck.input, &deck.output_dir());

    // Assert
    match result {
        Err(DeckError::UnsupportedKind { key, kind }) => {
            assert_eq!(key, "pairs");
            assert_eq!(kind, "matching");
        }
        other => panic!("Expected UnsupportedKind, got {other:?}"),
    }
    assert!(builder.compiler().calls().is_empty());
    assert_eq!(std::fs::read_dir(deck.output_dir())?.count(), 0);
    Ok(())
}

#[test]
fn given_curiosity_disabled_when_building_then_no_card_shows_curiosity() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("mixed.yaml", decks::MIXED)?;
    let builder = deck.builder(false);

    // Act
    let cards = builder.prepare_cards(&deck.input)?;
    let document = builder.render(&cards);

    // Assert
    assert!(cards.iter().any(|c| c.curiosity.is_some()));
    assert!(!document.contains("Adopted in 1797."));
    assert!(!document.contains("Per cent means per hundred"));
    Ok(())
}

#[test]
fn given_curiosity_enabled_when_building_then_footer_is_escaped() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("mixed.yaml", decks::MIXED)?;
    let builder = deck.builder(true);

    // Act
    let cards = builder.prepare_cards(&deck.input)?;
    let document = builder.render(&cards);

    // Assert
    assert!(document.contains("{Adopted in 1797.}"));
    assert!(document.contains(r"Per cent means per hundred, 100\% is the whole."));
    Ok(())
}

#[test]
fn given_mixed_kinds_when_rendering_then_each_kind_gets_its_list_style() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("mixed.yaml", decks::MIXED)?;
    let builder = deck.builder(false);

    // Act
    let cards = builder.prepare_cards(&deck.input)?;
    let document = builder.render(&cards);
    let blocks = card_blocks(&document);

    // Assert
    assert!(blocks[0].contains(r"\begin{itemize}"));
    assert!(!blocks[0].contains(r"\bfseries"));
    assert!(blocks[1].contains(r"\begin{enumerate}"));
    assert!(blocks[1].contains(r"What is 50\% of 10?"));
    assert!(blocks[2].contains(r"\begin{itemize}"));
    assert!(blocks[2].contains(r"{$\star$}"));
    assert!(!blocks[1].contains(r"$\star$"));
    Ok(())
}

#[test]
fn given_random_shuffle_when_building_then_bold_option_is_still_the_answer() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("geography.yaml", decks::FOUR_MULTIPLE_CHOICE)?;
    let builder = deck.builder(false).with_shuffle(ShuffleMode::Random);
    let answers = ["Rome", "Jupiter", "Pacific", "Mercury"];

    for _ in 0..10 {
        // Act
        let cards = builder.prepare_cards(&deck.input)?;
        let document = builder.render(&cards);

        // Assert
        for (block, answer) in card_blocks(&document).iter().zip(answers) {
            assert!(block.contains(&format!(r"\bfseries \item {answer}\mdseries")));
        }
    }
    Ok(())
}

#[test]
fn given_toml_input_when_building_then_renders_in_declaration_order() -> Result<()> {
    // Arrange
    let toml = r#"
[zebra]
kind = "tf"
text = "Zebras are striped"
correct = 0

[aardvark]
kind = "enumeration"
text = "Name two insects"
options = ["ant", "termite"]
"#;
    let deck = TestDeck::new("animals.toml", toml)?;
    let builder = DeckBuilder::new(
        QuestionLoader::new().with_labels("True", "False"),
        LatexPresenter::default(),
        RecordingCompiler::new(),
    )
    .with_shuffle(ShuffleMode::Off);

    // Act
    let report = builder.build(&deck.input, &deck.output_dir())?;

    // Assert
    let calls = builder.compiler().calls();
    let blocks = card_blocks(&calls[0].0);
    assert!(blocks[0].contains("Zebras are striped"));
    assert!(blocks[0].contains(r"\bfseries \item True\mdseries"));
    assert!(blocks[1].contains("Name two insects"));
    assert_eq!(report.output_path, deck.output_dir().join("animals.pdf"));
    Ok(())
}

#[test]
fn given_failing_compiler_when_building_then_propagates_compilation_error() -> Result<()> {
    // Arrange
    let deck = TestDeck::new("geography.yaml", decks::FOUR_MULTIPLE_CHOICE)?;
    let builder = DeckBuilder::new(
        QuestionLoader::new(),
        LatexPresenter::default(),
        RecordingCompiler::failing("pdflatex exited with status 1"),
    );

    // Act
    let result = builder.build(&deck.input, &deck.output_dir());

    // Assert
    assert!(matches!(result, Err(DeckError::CompilationFailed { .. })));
    assert!(!deck.output_dir().join("geography.pdf").exists());
    Ok(())
}
