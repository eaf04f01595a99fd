use clap::Parser;
use quizdeck::cli::args::{Args, BacksArgs};
use std::path::PathBuf;

#[test]
fn given_no_arguments_when_parsing_then_fails() {
    // Arrange
    let args = vec!["quizdeck"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without an input file");
}

#[test]
fn given_only_file_when_parsing_then_uses_defaults() {
    // Arrange
    let args = vec!["quizdeck", "questions.yaml"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.file, PathBuf::from("questions.yaml"));
    assert!(!parsed.include_curiosity);
    assert!(!parsed.no_shuffle);
    assert_eq!(parsed.seed, None);
    assert_eq!(parsed.output_dir, None);
    assert_eq!(parsed.config, None);
    assert!(!parsed.dry_run);
    assert!(!parsed.json);
    assert_eq!(parsed.verbose, 0);
}

#[test]
fn given_short_curiosity_flag_when_parsing_then_includes_curiosity() {
    // Arrange
    let args = vec!["quizdeck", "-c", "questions.yaml"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(parsed.include_curiosity);
}

#[test]
fn given_underscore_curiosity_alias_when_parsing_then_includes_curiosity() {
    // Arrange - spelling accepted by existing build scripts
    let args = vec!["quizdeck", "--include_curiosity", "questions.yaml"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(parsed.include_curiosity);
}

#[test]
fn given_seed_and_output_dir_when_parsing_then_stores_them() {
    // Arrange
    let args = vec!["quizdeck", "--seed", "42", "-o", "build", "questions.yaml"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.seed, Some(42));
    assert_eq!(parsed.output_dir, Some(PathBuf::from("build")));
}

#[test]
fn given_no_shuffle_with_seed_when_parsing_then_fails() {
    // Arrange
    let args = vec!["quizdeck", "--no-shuffle", "--seed", "1", "questions.yaml"];

    // Act & Assert
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_dry_run_with_json_when_parsing_then_fails() {
    // Arrange
    let args = vec!["quizdeck", "--dry-run", "--json", "questions.yaml"];

    // Act & Assert
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_verbose_flag_when_parsing_then_increments_count() {
    // Arrange
    let args = vec!["quizdeck", "-vv", "questions.yaml"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_image_when_parsing_backs_args_then_succeeds() {
    // Arrange
    let args = vec!["quizdeck-backs", "-o", "out", "back.png"];

    // Act
    let parsed = BacksArgs::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.image, PathBuf::from("back.png"));
    assert_eq!(parsed.output_dir, Some(PathBuf::from("out")));
}
