pub mod board;
pub mod game_state;
pub mod location;
pub mod move_list;
pub mod player;
pub mod rule_helper;
pub mod view;
pub mod win_detector;
