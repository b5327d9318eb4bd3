use glam::Vec3;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use walkblob::prelude::*;

/// Route library logs (skipped chunks, export decisions) to the test output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn unit_triangle() -> WalkMesh {
    WalkMesh::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        vec![Vec3::Z; 3],
        vec![[0, 1, 2]],
    )
    .unwrap()
}

fn frame(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn test_unit_triangle_blob_layout() {
    let bytes = serialize_walkmesh(&unit_triangle()).unwrap();

    let mut expected = frame(b"vtx0", &floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]));
    expected.extend(frame(b"tri0", &[0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]));
    expected.extend(frame(b"nom0", &floats(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0])));

    assert_eq!(bytes, expected);
    assert_eq!(parse_walkmesh_bytes(&bytes).unwrap(), unit_triangle());
}

#[test]
fn test_empty_mesh_blob() {
    let bytes = serialize_walkmesh(&WalkMesh::default()).unwrap();
    let expected = [frame(b"vtx0", &[]), frame(b"tri0", &[]), frame(b"nom0", &[])].concat();
    assert_eq!(bytes, expected);

    let mesh = parse_walkmesh_bytes(&bytes).unwrap();
    assert!(mesh.is_empty());
}

#[test]
fn test_file_roundtrip_preserves_bits() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("odd.walk");

    let mesh = WalkMesh::new(
        vec![
            Vec3::new(-0.0, 1.0e-40, f32::MAX),
            Vec3::new(f32::MIN_POSITIVE, -7.25, 3.0e8),
            Vec3::new(0.1, 0.2, 0.3),
        ],
        vec![Vec3::new(0.0, -1.0, 0.0); 3],
        vec![[2, 1, 0], [0, 0, 0]],
    )
    .unwrap();

    let written = write_walkmesh_file(&path, &mesh).unwrap();
    assert_eq!(written, std::fs::metadata(&path).unwrap().len());

    let decoded = read_walkmesh_file(&path).unwrap();
    let bits = |m: &WalkMesh| -> Vec<[u32; 3]> {
        m.vertices.iter().map(|v| v.to_array().map(f32::to_bits)).collect()
    };
    assert_eq!(bits(&decoded), bits(&mesh));
    assert_eq!(decoded.triangles, mesh.triangles);
}

#[test]
fn test_unknown_chunks_are_skipped() {
    init_tracing();
    let mut bytes: Vec<u8> = Vec::new();
    write_chunk(&mut bytes, b"nom0", &floats(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0])).unwrap();
    write_chunk(&mut bytes, b"mat0", b"stone").unwrap();
    write_chunk(&mut bytes, b"tri0", &[0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]).unwrap();
    write_chunk(&mut bytes, b"\x00\xffzz", &[]).unwrap();
    write_chunk(&mut bytes, b"vtx0", &floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])).unwrap();

    assert_eq!(parse_walkmesh_bytes(&bytes).unwrap(), unit_triangle());
}

#[test]
fn test_truncated_blob_is_rejected() {
    let bytes = serialize_walkmesh(&unit_triangle()).unwrap();

    let err = parse_walkmesh_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
    match err {
        Error::MalformedChunk { tag, expected, actual } => {
            assert_eq!(tag, Some(Tag::NOM0));
            assert_eq!(expected, 36);
            assert_eq!(actual, 35);
        }
        other => panic!("expected MalformedChunk, got {other:?}"),
    }
}

#[test]
fn test_missing_chunk_is_rejected() {
    let mut bytes: Vec<u8> = Vec::new();
    write_chunk(&mut bytes, b"vtx0", &[]).unwrap();
    write_chunk(&mut bytes, b"nom0", &[]).unwrap();

    assert!(matches!(
        parse_walkmesh_bytes(&bytes),
        Err(Error::MissingChunk(tag)) if tag == Tag::TRI0
    ));
}

#[test]
fn test_out_of_range_index_is_rejected() {
    let mut bytes: Vec<u8> = Vec::new();
    write_chunk(&mut bytes, b"vtx0", &floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])).unwrap();
    write_chunk(&mut bytes, b"tri0", &[0, 0, 0, 0, 1, 0, 0, 0, 3, 0, 0, 0]).unwrap();
    write_chunk(&mut bytes, b"nom0", &floats(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0])).unwrap();

    assert_eq!(
        parse_walkmesh_bytes(&bytes).unwrap_err().to_string(),
        Error::from(MeshDefect::IndexOutOfRange { triangle: 0, index: 3, vertex_count: 3 }).to_string()
    );
}

#[test]
fn test_invalid_tag_is_rejected() {
    let mut out: Vec<u8> = Vec::new();
    assert!(matches!(write_chunk(&mut out, b"vtx", &[]), Err(Error::InvalidArgument { .. })));
    assert!(matches!(write_chunk(&mut out, b"vtx00", &[]), Err(Error::InvalidArgument { .. })));
    assert!(out.is_empty());
}

#[test]
fn test_chunk_stream_roundtrip() {
    let chunks = vec![
        Chunk::new(Tag::from_bytes(*b"abcd"), b"hello".to_vec()),
        Chunk::new(Tag::from_bytes(*b"\x00\x01\x02\x03"), Vec::<u8>::new()),
        Chunk::new(Tag::from_bytes(*b"abcd"), vec![0xff; 300]),
    ];

    let mut bytes: Vec<u8> = Vec::new();
    let written = write_chunks(&mut bytes, &chunks).unwrap();
    assert_eq!(written as usize, bytes.len());

    assert_eq!(read_all_chunks(&bytes[..]).unwrap(), chunks);
}

#[test]
fn test_export_from_json_scene() {
    init_tracing();
    let dir = tempdir().unwrap();
    let output = dir.path().join("level.walk");

    let scene = JsonScene::from_json_str(
        r#"{
            "objects": [
                { "name": "WalkMesh", "kind": "mesh", "layers": [1],
                  "vertices": [[5, 5, 5], [6, 5, 5], [5, 6, 5]],
                  "normals": [[0, 0, 1], [0, 0, 1], [0, 0, 1]],
                  "polygons": [[0, 1, 2]] },
                { "name": "WalkMesh", "kind": "mesh", "layers": [3],
                  "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
                  "normals": [[0, 0, 1], [0, 0, 1], [0, 0, 1]],
                  "polygons": [[0, 1, 2]] }
            ]
        }"#,
        3,
    )
    .unwrap();

    let report = export_walk_mesh(&scene, &ExportOptions::default(), &output)
        .unwrap()
        .unwrap();
    assert_eq!(report.vertex_count, 3);
    assert_eq!(report.triangle_count, 1);
    assert_eq!(report.bytes_written, 44 + 20 + 44);

    assert_eq!(read_walkmesh_file(&output).unwrap(), unit_triangle());
}

#[test]
fn test_export_skips_when_mesh_missing() {
    init_tracing();
    let dir = tempdir().unwrap();
    let output = dir.path().join("level.walk");
    let scene = JsonScene::from_json_str(r#"{ "objects": [] }"#, 3).unwrap();

    assert_eq!(export_walk_mesh(&scene, &ExportOptions::default(), &output).unwrap(), None);
    assert!(!output.exists());

    let options = ExportOptions::from_toml_str("on_missing = \"fail\"").unwrap();
    assert!(matches!(
        export_walk_mesh(&scene, &options, &output),
        Err(Error::WalkMeshNotFound { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_walk_on_decoded_mesh() {
    // Two triangles forming the unit square
    let mesh = WalkMesh::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
        vec![Vec3::Z; 4],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .unwrap();
    let decoded = parse_walkmesh_bytes(&serialize_walkmesh(&mesh).unwrap()).unwrap();

    let nav = WalkNavigator::new(&decoded);
    let mut wp = nav.start(Vec3::new(0.9, 0.1, 2.0)).unwrap();

    // Diagonally across the shared edge, then off the far side
    nav.walk(&mut wp, Vec3::new(-0.8, 0.8, 0.0));
    assert!(nav.world_point(&wp).abs_diff_eq(Vec3::new(0.1, 0.9, 0.0), 1e-4));

    nav.walk(&mut wp, Vec3::new(0.0, 5.0, 0.0));
    assert!(nav.world_point(&wp).abs_diff_eq(Vec3::new(0.1, 1.0, 0.0), 1e-4));
    assert!(nav.world_normal(&wp).abs_diff_eq(Vec3::Z, 1e-6));
}
