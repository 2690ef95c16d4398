pub mod detail;
pub mod listing;
pub mod state_index;

pub use detail::get_site_instance;
pub use listing::get_sites_for_state;
pub use state_index::{build_state_url_dict, StateUrlMap};
