pub mod footer;
pub mod gallery;
pub mod header;
pub mod hero;
pub mod leaderboard;
pub mod market;
pub mod modal_host;
pub mod particle_canvas;
pub mod proposals;
pub mod quests;
pub mod stats_panel;
pub mod toast_stack;
