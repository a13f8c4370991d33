//! iOS artifacts: associated-domain entitlements and app site association files.

pub mod entitlements;
pub mod site_association;

pub use entitlements::{associated_domains, write_entitlements};
pub use site_association::{app_id, generate_site_association_files, site_association_for_host};
