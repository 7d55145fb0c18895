//! In-memory PDFs for tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Operations drawing `fragments` one after another at height `y`.
///
/// Each fragment is wrapped in a marked-content span, as form generators do.
pub fn text_line(y: i64, fragments: &[&str]) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(10)]),
        Operation::new("Td", vec![Object::Integer(50), Object::Integer(y)]),
    ];
    for fragment in fragments {
        ops.push(Operation::new("BMC", vec![Object::Name(b"Span".to_vec())]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(*fragment)]));
        ops.push(Operation::new("EMC", vec![]));
    }
    ops.push(Operation::new("ET", vec![]));
    ops
}

/// Build a PDF with one page per entry, each page drawing its lines in order.
pub fn order_form_pdf(pages: &[Vec<Vec<Operation>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let content: Content = Content {
            operations: lines.iter().flatten().cloned().collect(),
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("save PDF");
    buffer
}
