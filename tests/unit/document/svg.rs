use super::*;
use crate::{
    composite::occlusion::composite_row,
    foundation::core::Canvas,
    synth::{row::Row, stream::StreamMode},
};

fn tiny_doc() -> Document {
    let row = Row {
        index: 0,
        baseline: 10.0,
        points: vec![Point::new(0.0, 9.5), Point::new(20.0, -0.004)],
    };
    Document::new(
        Canvas {
            width: 20.0,
            height: 30.0,
        },
        1.5,
        42,
        StreamMode::Shared,
        vec![composite_row(&row, 2.0)],
    )
}

#[test]
fn serializes_exact_markup() {
    let expected = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<svg width=\"20\" height=\"30\" viewBox=\"0 0 20 30\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        "  <rect width=\"20\" height=\"30\" fill=\"white\"/>\n",
        "  <path d=\"M 0.00,9.50 L 20.00,0.00 L 20.00,13.00 L 0.00,13.00 Z\" fill=\"white\" stroke=\"none\"/>\n",
        "  <path d=\"M 0.00,9.50 L 20.00,0.00\" fill=\"none\" stroke=\"black\" stroke-width=\"1.5\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n",
        "</svg>",
    );
    assert_eq!(serialize(&tiny_doc()), expected);
}

#[test]
fn document_to_svg_matches_free_function() {
    let doc = tiny_doc();
    assert_eq!(doc.to_svg(), serialize(&doc));
    assert_eq!(doc.element_count(), 3);
    assert_eq!(doc.row_count(), 1);
}

#[test]
fn path_data_formats_curves_too() {
    let mut p = BezPath::new();
    p.move_to((1.0, 2.0));
    p.quad_to((3.0, 4.0), (5.0, 6.0));
    p.curve_to((7.0, 8.0), (9.0, 10.0), (11.0, 12.25));
    p.close_path();
    assert_eq!(
        path_data(&p),
        "M 1.00,2.00 Q 3.00,4.00 5.00,6.00 C 7.00,8.00 9.00,10.00 11.00,12.25 Z"
    );
}

#[test]
fn fingerprint_tracks_content() {
    let a = serialize(&tiny_doc());
    assert_eq!(fingerprint(&a), fingerprint(&a.clone()));
    assert_ne!(fingerprint(&a), fingerprint(&a.replace("black", "gray")));
}

#[test]
fn usvg_reads_back_every_element() {
    let markup = serialize(&tiny_doc());
    let tree = parse_markup(&markup).unwrap();
    assert_eq!(count_path_nodes(tree.root()), 3);
    assert_eq!(tree.size().width(), 20.0);
    assert_eq!(tree.size().height(), 30.0);
}

#[test]
fn garbage_markup_is_rejected() {
    assert!(parse_markup("<svg").is_err());
}

#[test]
fn capacity_hint_covers_a_default_document() {
    let doc = crate::generate(&crate::Configuration::default()).unwrap();
    let markup = serialize(&doc);
    let hint = capacity_hint(doc.pairs.len());
    assert!(markup.len() <= hint, "{} > {hint}", markup.len());
    assert!(markup.len() > hint / 2);
}
