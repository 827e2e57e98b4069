//! Text renderers and form models.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components turn typed API records into plain text blocks and hold the
//! local state of multi-step forms. Pages compose them; the CLI prints the
//! result. Output carries no terminal control codes.

pub mod account_card;
pub mod add_account_wizard;
pub mod getting_started;
pub mod non_compliant_card;
pub mod policy_form;
pub mod policy_list;
pub mod region_selector;
pub mod resources_table;
pub mod scan_status_card;
pub mod stats_card;
pub mod status_badge;
pub mod table;
pub mod violations_table;
