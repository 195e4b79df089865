// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Read endpoints for books and the catalog feeds, plus user registration,
// cart updates and token issuance.

pub mod books; // GET /books, GET /book/:id
pub mod cart; // POST /cart
pub mod feeds; // GET /news, /events, /members
pub mod service; // GET /, GET /health
pub mod token; // POST /jwt
pub mod users; // GET /users[/:email], POST /users
