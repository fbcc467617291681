//! WordprocessingML element names and attribute helpers.
//!
//! Word always writes the main namespace with the `w` prefix, so elements
//! are matched by qualified name.

use quick_xml::events::BytesStart;

use crate::error::Result;

pub const BODY: &[u8] = b"w:body";
pub const TBL: &[u8] = b"w:tbl";
pub const TBL_GRID: &[u8] = b"w:tblGrid";
pub const GRID_COL: &[u8] = b"w:gridCol";
pub const TR: &[u8] = b"w:tr";
pub const TR_PR: &[u8] = b"w:trPr";
pub const GRID_BEFORE: &[u8] = b"w:gridBefore";
pub const TC: &[u8] = b"w:tc";
pub const TC_PR: &[u8] = b"w:tcPr";
pub const GRID_SPAN: &[u8] = b"w:gridSpan";
pub const V_MERGE: &[u8] = b"w:vMerge";
pub const P: &[u8] = b"w:p";
pub const P_PR: &[u8] = b"w:pPr";
pub const JC: &[u8] = b"w:jc";
pub const R: &[u8] = b"w:r";
pub const T: &[u8] = b"w:t";
pub const TAB: &[u8] = b"w:tab";
pub const BR: &[u8] = b"w:br";
pub const CR: &[u8] = b"w:cr";

/// Children of `w:pPr` that the schema places after `w:jc`.
pub const AFTER_JC: &[&[u8]] = &[
    b"w:textDirection",
    b"w:textAlignment",
    b"w:textboxTightWrap",
    b"w:outlineLvl",
    b"w:divId",
    b"w:cnfStyle",
    b"w:rPr",
    b"w:sectPr",
    b"w:pPrChange",
];

/// Read an attribute value by qualified name.
pub fn attr(e: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    for attribute in e.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == key {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Read `w:val`.
pub fn str_val(e: &BytesStart) -> Result<Option<String>> {
    attr(e, b"w:val")
}

/// Read `w:val` as a non-negative integer; unparsable values count as absent.
pub fn int_val(e: &BytesStart) -> Result<Option<usize>> {
    Ok(str_val(e)?.and_then(|v| v.trim().parse().ok()))
}
