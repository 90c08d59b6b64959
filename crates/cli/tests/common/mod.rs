#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// `func (b Bigger) M(x Big, y Bigger) Bigger` plus a clean helper.
pub const SHAPES_JSON: &str = r#"{
  "units": [
    {
      "path": "example.com/shapes",
      "types": [
        { "id": "shapes.Big", "fields": [
          { "name": "a", "type": { "primitive": "int64" } },
          { "name": "b", "type": { "primitive": "int64" } } ] },
        { "id": "shapes.Bigger", "fields": [
          { "name": "a", "type": { "primitive": "int64" } },
          { "name": "b", "type": { "primitive": "int64" } },
          { "name": "c", "type": { "primitive": "int64" } } ] }
      ],
      "functions": [
        { "name": "M",
          "position": { "file": "shapes/shapes.go", "line": 12, "column": 1 },
          "receiver": { "named": "shapes.Bigger" },
          "params": [
            { "name": "x", "type": { "named": "shapes.Big" } },
            { "name": "y", "type": { "named": "shapes.Bigger" } } ],
          "results": [ { "type": { "named": "shapes.Bigger" } } ] },
        { "name": "Area",
          "position": { "file": "shapes/shapes.go", "line": 3, "column": 1 },
          "params": [ { "name": "b", "type": { "pointer": { "named": "shapes.Bigger" } } } ],
          "results": [ { "type": { "primitive": "float64" } } ] }
      ]
    }
  ]
}"#;

pub const CLEAN_JSON: &str = r#"{
  "units": [
    { "path": "example.com/clean",
      "types": [ { "id": "clean.Point", "fields": [
        { "name": "x", "type": { "primitive": "int64" } },
        { "name": "y", "type": { "primitive": "int64" } } ] } ],
      "functions": [
        { "name": "Add",
          "position": { "file": "clean.go", "line": 1, "column": 1 },
          "params": [ { "name": "p", "type": { "named": "clean.Point" } } ] } ] }
  ]
}"#;

pub const SHAPES_LINE: &str = "shapes/shapes.go:12:1: receiver, parameter 'y' at index 1, and \
     return value 'shapes.Bigger' at index 0 should be made into pointers \
     (func (shapes.Bigger).M(x shapes.Big, y shapes.Bigger) shapes.Bigger)";

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fixture");
    path
}
