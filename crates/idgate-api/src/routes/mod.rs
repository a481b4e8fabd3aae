//! Route handlers, grouped by area. Each module exposes `router()`.
//!
//! | Module | Routes | Auth |
//! |--------|--------|------|
//! | [`system`] | `GET /system/health` | no |
//! | [`ping`] | `GET /ping/user-service` | yes |
//! | [`users`] | `POST /users`, `PUT /users/{id}` | yes |

pub mod ping;
pub mod system;
pub mod users;
