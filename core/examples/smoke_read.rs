use std::path::PathBuf;

use ja_core::{EngineOptions, JsonEngine};

fn main() -> Result<(), String> {
  let mut args = std::env::args().skip(1);
  let path = args
    .next()
    .ok_or_else(|| "usage: cargo run -p ja_core --example smoke_read -- <path-to-json> [access-string]".to_string())?;
  let access = args.next().unwrap_or_default();
  let path = PathBuf::from(path);

  let eng = JsonEngine::new(EngineOptions::default());
  let doc = eng.load_from_file(&path, true).map_err(|e| e.to_string())?;

  match doc.read_value(&access) {
    Some(v) => {
      println!("kind={:?}", ja_core::kind_of(v));
      println!("value={v:#}");
      if let Some(n) = v.as_array().map(Vec::len) {
        println!("dimensions={:?}", doc.array_dimension_sizes(&access));
        println!("len={n}");
      }
    }
    None => println!("not found: {access:?}"),
  }
  Ok(())
}
