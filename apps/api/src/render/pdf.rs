use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use super::font_metrics::{encode_win_ansi, Font};
use super::layout::{DrawOp, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use super::RenderError;

/// Serializes layout instructions into a one-page PDF document.
pub fn write_pdf(ops: &[DrawOp]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let content = Content {
        operations: content_operations(ops),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn content_operations(ops: &[DrawOp]) -> Vec<Operation> {
    let mut operations = vec![
        // Black fill for text, black 1pt stroke for rules.
        Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
        Operation::new("RG", vec![0.into(), 0.into(), 0.into()]),
        Operation::new("w", vec![1.into()]),
    ];

    for op in ops {
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                size,
                font,
            } => operations.extend([
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(font.resource_name().into()), real(*size)],
                ),
                Operation::new("Td", vec![real(*x), real(*y)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ]),
            DrawOp::Rule { y } => operations.extend([
                Operation::new("m", vec![real(MARGIN), real(*y)]),
                Operation::new("l", vec![real(PAGE_WIDTH - MARGIN), real(*y)]),
                Operation::new("S", vec![]),
            ]),
        }
    }
    operations
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}
