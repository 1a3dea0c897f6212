pub mod get_appearance_use_case;
pub mod set_appearance_use_case;
