//! Wire-format tests for serialized game states.

use serde_json::json;
use togyz_qumalaq::{GameState, Move, PitIndex, Player, Tuzdik};

#[test]
fn test_initial_state_wire_shape() {
    let state = GameState::new();
    let value = serde_json::to_value(&state).unwrap();

    assert_eq!(value.as_object().unwrap().len(), 6);
    assert_eq!(value["board"][0], json!([9, 9, 9, 9, 9, 9, 9, 9, 9]));
    assert_eq!(value["board"][1], json!([9, 9, 9, 9, 9, 9, 9, 9, 9]));
    assert_eq!(value["kazan"], json!([0, 0]));
    assert_eq!(value["currentPlayer"], json!(1));
    assert_eq!(value["gameOver"], json!(false));
    assert!(value["winner"].is_null());
    assert!(value["tuzdik"].is_null());
}

#[test]
fn test_midgame_wire_shape() {
    let state = GameState::from_parts(
        [[10, 10, 10, 10, 10, 10, 10, 10, 0], [0, 9, 9, 9, 9, 9, 9, 9, 9]],
        [10, 0],
        Player::Two,
        Some(Tuzdik::new(Player::Two, PitIndex::new(5).unwrap())),
    );
    let value = serde_json::to_value(&state).unwrap();

    assert_eq!(value["currentPlayer"], json!(2));
    assert_eq!(value["kazan"], json!([10, 0]));
    // The tuzdik is the pair [owner, pit].
    assert_eq!(value["tuzdik"], json!([2, 5]));
    assert_eq!(value["gameOver"], json!(false));
    assert!(value["winner"].is_null());
}

#[test]
fn test_finished_state_reports_winner() {
    let won = GameState::from_parts([[0; 9], [1; 9]], [90, 40], Player::Two, None);
    let value = serde_json::to_value(&won).unwrap();
    assert_eq!(value["gameOver"], json!(true));
    assert_eq!(value["winner"], json!(1));

    let drawn = GameState::from_parts([[0; 9], [0; 9]], [81, 81], Player::One, None);
    let value = serde_json::to_value(&drawn).unwrap();
    assert_eq!(value["gameOver"], json!(true));
    assert!(value["winner"].is_null(), "draws serialize winner as null");
}

#[test]
fn test_state_round_trips() {
    let state = GameState::new()
        .apply_move(Move::new(Player::One, PitIndex::new(8).unwrap()))
        .apply_move(Move::new(Player::Two, PitIndex::new(1).unwrap()));

    let encoded = serde_json::to_string(&state).unwrap();
    let decoded: GameState = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, state);
    assert!(!decoded.is_game_over());
    assert_eq!(decoded.current_player(), Player::One);
}

#[test]
fn test_fixture_document_loads() {
    // A position as a host would send it over the wire.
    let raw = r#"{
        "board": [[1, 0, 0, 3, 0, 2, 0, 0, 0], [2, 1, 1, 1, 1, 1, 1, 1, 1]],
        "kazan": [24, 10],
        "currentPlayer": 1,
        "gameOver": false,
        "winner": null,
        "tuzdik": [2, 3]
    }"#;
    let state: GameState = serde_json::from_str(raw).unwrap();

    assert_eq!(state.current_player(), Player::One);
    assert_eq!(
        state.tuzdik(),
        Some(Tuzdik::new(Player::Two, PitIndex::new(3).unwrap()))
    );
    assert_eq!(state.kazan(Player::One), 24);
    assert_eq!(state.board()[0][3], 3);
    assert!(!state.is_game_over());
    assert_eq!(state.legal_moves().len(), 3);
}

#[test]
fn test_invalid_documents_rejected() {
    let template = |player: &str, tuzdik: &str| {
        format!(
            r#"{{
                "board": [[9, 9, 9, 9, 9, 9, 9, 9, 9], [9, 9, 9, 9, 9, 9, 9, 9, 9]],
                "kazan": [0, 0],
                "currentPlayer": {player},
                "gameOver": false,
                "winner": null,
                "tuzdik": {tuzdik}
            }}"#
        )
    };

    assert!(serde_json::from_str::<GameState>(&template("3", "null")).is_err());
    assert!(serde_json::from_str::<GameState>(&template("0", "null")).is_err());
    assert!(serde_json::from_str::<GameState>(&template("1", "[3, 2]")).is_err());
    assert!(serde_json::from_str::<GameState>(&template("1", "[1, 9]")).is_err());

    // A short row is a type error, not a silent truncation.
    let short_row = r#"{
        "board": [[9, 9, 9, 9, 9, 9, 9, 9], [9, 9, 9, 9, 9, 9, 9, 9, 9]],
        "kazan": [0, 0],
        "currentPlayer": 1,
        "gameOver": false,
        "winner": null,
        "tuzdik": null
    }"#;
    assert!(serde_json::from_str::<GameState>(short_row).is_err());
}
