#![cfg(target_arch = "wasm32")]

use tic_tac_toe_rust::{game_from_location, new_game};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn handle_plays_to_a_win() {
    let mut game = new_game(Vec::new()).unwrap();
    for cell in [0, 4, 1, 3, 2] {
        assert!(game.apply_move(cell));
    }

    assert_eq!(game.status_text(), "Winner: X");
    assert!(game.is_winning_cell(1));
    assert_eq!(game.winning_lines().length(), 1);
    assert!(!game.apply_move(8));
}

#[wasm_bindgen_test]
fn location_query_resumes_the_same_game() {
    let mut game = new_game(vec!["A".to_string(), "B".to_string()]).unwrap();
    game.apply_move(4);
    game.apply_move(0);
    assert!(game.jump_to(1));

    let resumed = game_from_location(&game.location_query());
    assert_eq!(resumed.current_move(), 1);
    assert_eq!(resumed.last_move(), 2);
    assert_eq!(resumed.cells(), game.cells());
}

#[wasm_bindgen_test]
fn bad_location_falls_back_to_new_game() {
    let game = game_from_location("?history=%%%");
    assert_eq!(game.last_move(), 0);
    assert_eq!(game.status_text(), "Player X, choose a square!");
}
