// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here is mounted behind `middleware::require_bearer`; the handlers can
// rely on an `AuthUser` extension being present.

pub mod books; // POST /book(s), PUT /books[/:id], DELETE /books[/:id]
