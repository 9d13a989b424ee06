pub mod action_template;
pub mod activity;
pub mod case;
pub mod case_suspect;
pub mod dashboard;
pub mod evidence;
pub mod forensic_action;
pub mod suspect;
pub mod victim;
