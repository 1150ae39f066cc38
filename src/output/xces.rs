//! XCES alignment XML emission for the overlap engine.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Writer;

use crate::error::AlignError;
use crate::types::Alignment;

/// Serialize an alignment as a `cesAlign` document with one `linkGrp`.
///
/// `meta` attribute pairs are appended verbatim to the `linkGrp`
/// element; the per-link `overlap` attribute is omitted when undefined.
pub fn write_xces(
    alignment: &Alignment,
    from_doc: &str,
    to_doc: &str,
    meta: &[(String, String)],
) -> Result<String, AlignError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_io_error)?;

    let mut ces_align = BytesStart::new("cesAlign");
    ces_align.push_attribute(("version", "1.0"));
    writer
        .write_event(Event::Start(ces_align))
        .map_err(xml_io_error)?;

    let mut link_grp = BytesStart::new("linkGrp");
    link_grp.push_attribute(("targType", "s"));
    link_grp.push_attribute(("fromDoc", from_doc));
    link_grp.push_attribute(("toDoc", to_doc));
    for (key, value) in meta {
        link_grp.push_attribute((key.as_str(), value.as_str()));
    }
    writer
        .write_event(Event::Start(link_grp))
        .map_err(xml_io_error)?;

    for (i, link) in alignment.links.iter().enumerate() {
        let mut element = BytesStart::new("link");
        element.push_attribute(("id", format!("SL{}", i + 1).as_str()));
        let xtargets = format!("{} ; {}", link.src_ids.join(" "), link.trg_ids.join(" "));
        element.push_attribute(("xtargets", xtargets.as_str()));
        if let Some(ratio) = link.overlap_ratio {
            element.push_attribute(("overlap", format!("{ratio:.3}").as_str()));
        }
        writer
            .write_event(Event::Empty(element))
            .map_err(xml_io_error)?;
    }

    writer
        .write_event(Event::End(quick_xml::events::BytesEnd::new("linkGrp")))
        .map_err(xml_io_error)?;
    writer
        .write_event(Event::End(quick_xml::events::BytesEnd::new("cesAlign")))
        .map_err(xml_io_error)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|_| AlignError::encoding("XCES output"))
}

fn xml_io_error(err: quick_xml::Error) -> AlignError {
    AlignError::io(
        "writing XCES output",
        std::io::Error::new(std::io::ErrorKind::Other, err),
    )
}
