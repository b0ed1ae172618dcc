// ============================================================================
// Catalog Persistence Module
// ============================================================================
//
// Two formats:
//
// - **JSON** (`json`): the full catalog including ids, so a reload yields the
//   same object graph. This is the format the CLI reads and writes.
// - **SQL script** (`save`): CREATE/GRANT statements that rebuild an
//   equivalent catalog; ids are not preserved.
//
// Both are implemented as methods on `Database`.

pub mod json;
mod save;
