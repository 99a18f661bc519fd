pub mod episode_list;
pub mod player;
