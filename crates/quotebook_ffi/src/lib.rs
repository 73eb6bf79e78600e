//! Flutter bridge surface for `quotebook_core`.

pub mod api;
