#![cfg(feature = "stl-io")]

use esm_case::{case::CaseParams, design::Design, mesh::Mesh};
use std::io::Cursor;

#[test]
fn mesh_to_stl_ascii() {
    let cube: Mesh<()> = Mesh::cuboid(2.0, 2.0, 2.0, None);
    let stl_str = cube.to_stl_ascii("test_cube");
    assert!(stl_str.starts_with("solid test_cube"));
    assert!(stl_str.trim_end().ends_with("endsolid test_cube"));
    assert_eq!(stl_str.matches("facet normal").count(), 12);
    assert_eq!(stl_str.matches("vertex").count(), 36);
}

#[test]
fn binary_stl_reads_back() -> Result<(), Box<dyn std::error::Error>> {
    let cube: Mesh<()> = Mesh::cuboid(2.0, 2.0, 2.0, None);
    let bytes = cube.to_stl_binary("A cube")?;
    let stl = stl_io::read_stl(&mut Cursor::new(bytes))?;
    assert_eq!(stl.faces.len(), 12);
    Ok(())
}

#[test]
fn case_writes_to_disk() -> Result<(), Box<dyn std::error::Error>> {
    let mut design = Design::new();
    let report = esm_case::build_case(&mut design, &CaseParams::default())?;
    let body = design.body(report.body).ok_or("case body missing")?;

    let path = std::env::temp_dir().join(format!("esm_case_{}.stl", std::process::id()));
    body.mesh.write_stl(&path, &report.name, false)?;
    let mut file = std::fs::File::open(&path)?;
    let stl = stl_io::read_stl(&mut file)?;
    assert_eq!(stl.faces.len(), report.triangles);
    let _ = std::fs::remove_file(&path);
    Ok(())
}
