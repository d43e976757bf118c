use clap::Parser;
use cloudnotes::cli::args::{Args, Command};

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["cloudnotes"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_list_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["cloudnotes", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { json } => assert!(!json),
        _ => panic!("Expected List command"),
    }
    assert_eq!(parsed.config, None);
}

#[test]
fn given_list_with_json_flag_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["cloudnotes", "list", "--json"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { json } => assert!(json),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn given_create_command_when_parsing_then_reads_positionals() {
    // Arrange
    let args = vec!["cloudnotes", "create", "Groceries", "milk and eggs"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Create {
            name,
            description,
            image,
        } => {
            assert_eq!(name, "Groceries");
            assert_eq!(description, "milk and eggs");
            assert_eq!(image, None);
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn given_create_with_image_flag_when_parsing_then_reads_path() {
    // Arrange
    let args = vec![
        "cloudnotes",
        "create",
        "Groceries",
        "milk and eggs",
        "--image",
        "/tmp/cat.png",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Create { image, .. } => {
            assert_eq!(image.unwrap().to_str().unwrap(), "/tmp/cat.png");
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn given_create_without_description_when_parsing_then_fails() {
    // Arrange
    let args = vec!["cloudnotes", "create", "Groceries"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without a description");
}

#[test]
fn given_delete_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["cloudnotes", "delete", "note-42"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Delete { note_id } => assert_eq!(note_id, "note-42"),
        _ => panic!("Expected Delete command"),
    }
}

#[test]
fn given_whoami_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["cloudnotes", "whoami"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::Whoami));
}

#[test]
fn given_global_config_flag_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["cloudnotes", "-c", "/tmp/cloudnotes.toml", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(
        parsed.config.unwrap().to_str().unwrap(),
        "/tmp/cloudnotes.toml"
    );
}

#[test]
fn given_repeated_verbose_flag_when_parsing_then_counts() {
    // Arrange
    let args = vec!["cloudnotes", "-v", "-v", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.verbose, 2);
}
