//! Build script that ensures Cargo rebuilds when migrations change.
//!
//! `embed_migrations!` reads the migration files at compile time, but Cargo
//! cannot see that dependency on its own.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
