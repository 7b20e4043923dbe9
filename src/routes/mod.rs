/// Router Module Index
///
/// Groups the page routes by the access category the gate assigns to them. The grouping is
/// documentation only: every route is served through the same gate layer, which classifies
/// by path, so moving a handler between modules never changes who can reach it.

/// Pages anyone can open.
pub mod public;

/// Login, registration and password recovery. Anonymous visitors only.
pub mod auth_pages;

/// Pages shared by every authenticated role.
pub mod authenticated;

/// Role dashboards under `/admin`, `/doctor` and `/dashboard`.
pub mod dashboards;
