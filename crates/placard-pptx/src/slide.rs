//! Slide part editing.
//!
//! A slide is kept as its raw XML plus an index of its named shapes.
//! Edits are streaming rewrites: events are copied through a writer and
//! only the targeted shape's subtree changes, so untouched markup
//! survives byte-for-byte and a repeated run converges on the same file.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use placard_core::{RectPt, TextWrite};

use crate::constants::{EMU_PER_POINT, SZ_PER_POINT};
use crate::error::{PptxError, Result};

/// Convert a point measurement to EMU
pub fn pt_to_emu(pt: f32) -> i64 {
    (f64::from(pt) * EMU_PER_POINT as f64).round() as i64
}

/// Font size attribute value for a point size (`sz` is in centipoints)
pub fn pt_to_sz(pt: f32) -> u32 {
    (pt * SZ_PER_POINT as f32).round() as u32
}

/// A named shape found on a slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeInfo {
    /// Name from the shape's non-visual properties
    pub name: String,
    /// Body carries a vertical text setting (`vert` or `eaVert`)
    pub vertical: bool,
}

/// One slide part, held as XML with an index of its shapes
#[derive(Debug, Clone)]
pub struct SlidePart {
    number: u32,
    xml: String,
    shapes: Vec<ShapeInfo>,
}

/// Scan state for one open `p:sp` element
#[derive(Default)]
struct SpFrame {
    named: bool,
    target: bool,
}

#[derive(Default)]
struct PendingShape {
    name: Option<String>,
    vertical: bool,
}

impl SlidePart {
    /// Parse a slide part and index its shapes
    pub fn parse(number: u32, xml: impl Into<String>) -> Result<Self> {
        let xml = xml.into();
        let shapes = scan_shapes(&xml)?;
        Ok(Self {
            number,
            xml,
            shapes,
        })
    }

    /// Slide number within the deck (1-based)
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The slide's current XML
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Shapes found on the slide, in document order
    pub fn shapes(&self) -> &[ShapeInfo] {
        &self.shapes
    }

    /// Names of all shapes on the slide
    pub fn shape_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }

    /// Look up a shape by name
    pub fn shape(&self, name: &str) -> Option<&ShapeInfo> {
        self.shapes.iter().find(|s| s.name == name)
    }

    /// Check if the slide carries a shape with this name
    pub fn has_shape(&self, name: &str) -> bool {
        self.shape(name).is_some()
    }

    /// Replace the shape's text with a single run.
    ///
    /// The first run's properties are kept for the new run; a paragraph
    /// with no runs donates its end-properties instead. Paragraph
    /// properties of the first paragraph survive as well. Shapes with
    /// vertical text are left untouched and reported.
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<TextWrite> {
        let info = self
            .shape(name)
            .ok_or_else(|| PptxError::shape_not_found(self.number, name))?;
        if info.vertical {
            return Ok(TextWrite::SkippedVertical);
        }

        let mut reader = Reader::from_str(&self.xml);
        reader.config_mut().trim_text(false);
        let mut out = Writer::new(Cursor::new(Vec::new()));
        let mut buf = Vec::new();

        let mut frames: Vec<SpFrame> = Vec::new();
        let mut claimed = false;
        let mut rebuilt = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"p:sp" => {
                        frames.push(SpFrame::default());
                        out.write_event(Event::Start(e))?;
                    }
                    b"p:cNvPr" => {
                        claim_frame(&mut frames, &mut claimed, &e, name);
                        out.write_event(Event::Start(e))?;
                    }
                    b"p:txBody" if target_open(&frames) && !rebuilt => {
                        let body =
                            collect_subtree(&mut reader, Event::Start(e.into_owned()), &mut buf)?;
                        write_replaced_body(&mut out, &body, text)?;
                        rebuilt = true;
                    }
                    _ => out.write_event(Event::Start(e))?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"p:cNvPr" => {
                        claim_frame(&mut frames, &mut claimed, &e, name);
                        out.write_event(Event::Empty(e))?;
                    }
                    _ => out.write_event(Event::Empty(e))?,
                },
                Event::End(e) => {
                    if e.name().as_ref() == b"p:sp" {
                        frames.pop();
                    }
                    out.write_event(Event::End(e))?;
                }
                Event::Eof => break,
                ev => out.write_event(ev)?,
            }
            buf.clear();
        }

        if !rebuilt {
            return Err(PptxError::invalid_deck(format!(
                "shape '{}' on slide {} has no text body",
                name, self.number
            )));
        }

        self.replace_xml(out)?;
        Ok(TextWrite::Applied)
    }

    /// Move and resize the shape, in points.
    ///
    /// Rewrites the offset and extent inside the shape's transform, or
    /// inserts a transform when the shape inherits one from its layout.
    /// Rotation and flip attributes on an existing transform are kept.
    pub fn set_geometry(&mut self, name: &str, rect: RectPt) -> Result<()> {
        if !self.has_shape(name) {
            return Err(PptxError::shape_not_found(self.number, name));
        }

        let mut reader = Reader::from_str(&self.xml);
        reader.config_mut().trim_text(false);
        let mut out = Writer::new(Cursor::new(Vec::new()));
        let mut buf = Vec::new();

        let mut frames: Vec<SpFrame> = Vec::new();
        let mut claimed = false;
        let mut rewritten = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"p:sp" => {
                        frames.push(SpFrame::default());
                        out.write_event(Event::Start(e))?;
                    }
                    b"p:cNvPr" => {
                        claim_frame(&mut frames, &mut claimed, &e, name);
                        out.write_event(Event::Start(e))?;
                    }
                    b"p:spPr" if target_open(&frames) && !rewritten => {
                        let props =
                            collect_subtree(&mut reader, Event::Start(e.into_owned()), &mut buf)?;
                        write_positioned_props(&mut out, &props, rect)?;
                        rewritten = true;
                    }
                    _ => out.write_event(Event::Start(e))?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"p:cNvPr" => {
                        claim_frame(&mut frames, &mut claimed, &e, name);
                        out.write_event(Event::Empty(e))?;
                    }
                    b"p:spPr" if target_open(&frames) && !rewritten => {
                        // re-open the collapsed element to hold the transform
                        out.write_event(Event::Start(start_with_attrs("p:spPr", &e)))?;
                        write_xfrm(&mut out, rect)?;
                        out.write_event(Event::End(BytesEnd::new("p:spPr")))?;
                        rewritten = true;
                    }
                    _ => out.write_event(Event::Empty(e))?,
                },
                Event::End(e) => {
                    if e.name().as_ref() == b"p:sp" {
                        frames.pop();
                    }
                    out.write_event(Event::End(e))?;
                }
                Event::Eof => break,
                ev => out.write_event(ev)?,
            }
            buf.clear();
        }

        self.replace_xml(out)
    }

    /// Set the font size, in points, on every run of the shape's text.
    ///
    /// Runs without properties get a fresh properties element carrying
    /// only the size. Paragraph end-properties are updated too so an
    /// empty placeholder keeps the size for future typing.
    pub fn set_font_size(&mut self, name: &str, size_pt: f32) -> Result<()> {
        if !self.has_shape(name) {
            return Err(PptxError::shape_not_found(self.number, name));
        }
        let sz = pt_to_sz(size_pt);
        let sz_text = sz.to_string();

        let mut reader = Reader::from_str(&self.xml);
        reader.config_mut().trim_text(false);
        let mut out = Writer::new(Cursor::new(Vec::new()));
        let mut buf = Vec::new();

        let mut frames: Vec<SpFrame> = Vec::new();
        let mut claimed = false;
        let mut pending_run = false;

        loop {
            let ev = reader.read_event_into(&mut buf)?;
            if matches!(ev, Event::Eof) {
                break;
            }

            // a run with no properties element gets one before its content
            if pending_run {
                pending_run = false;
                let starts_props = matches!(
                    &ev,
                    Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"a:rPr"
                );
                if !starts_props {
                    let mut rpr = BytesStart::new("a:rPr");
                    rpr.push_attribute(("sz", sz_text.as_str()));
                    out.write_event(Event::Empty(rpr))?;
                }
            }

            match ev {
                Event::Start(e) => match e.name().as_ref() {
                    b"p:sp" => {
                        frames.push(SpFrame::default());
                        out.write_event(Event::Start(e))?;
                    }
                    b"p:cNvPr" => {
                        claim_frame(&mut frames, &mut claimed, &e, name);
                        out.write_event(Event::Start(e))?;
                    }
                    b"a:r" if target_open(&frames) => {
                        pending_run = true;
                        out.write_event(Event::Start(e))?;
                    }
                    b"a:rPr" | b"a:endParaRPr" if target_open(&frames) => {
                        out.write_event(Event::Start(with_font_sz(&e, sz)))?;
                    }
                    _ => out.write_event(Event::Start(e))?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"p:cNvPr" => {
                        claim_frame(&mut frames, &mut claimed, &e, name);
                        out.write_event(Event::Empty(e))?;
                    }
                    b"a:rPr" | b"a:endParaRPr" if target_open(&frames) => {
                        out.write_event(Event::Empty(with_font_sz(&e, sz)))?;
                    }
                    _ => out.write_event(Event::Empty(e))?,
                },
                Event::End(e) => {
                    if e.name().as_ref() == b"p:sp" {
                        frames.pop();
                    }
                    out.write_event(Event::End(e))?;
                }
                ev => out.write_event(ev)?,
            }
            buf.clear();
        }

        self.replace_xml(out)
    }

    /// Read back the shape's text, paragraphs joined with newlines
    pub fn shape_text(&self, name: &str) -> Option<String> {
        if !self.has_shape(name) {
            return None;
        }

        let mut reader = Reader::from_str(&self.xml);
        reader.config_mut().trim_text(false);
        let mut buf = Vec::new();

        let mut frames: Vec<SpFrame> = Vec::new();
        let mut claimed = false;
        let mut in_text = false;
        let mut paragraphs = 0u32;
        let mut collected = String::new();

        loop {
            match reader.read_event_into(&mut buf).ok()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"p:sp" => frames.push(SpFrame::default()),
                    b"p:cNvPr" => claim_frame(&mut frames, &mut claimed, &e, name),
                    b"a:p" if target_open(&frames) => {
                        if paragraphs > 0 {
                            collected.push('\n');
                        }
                        paragraphs += 1;
                    }
                    b"a:t" if target_open(&frames) => in_text = true,
                    _ => {}
                },
                Event::Empty(e) if e.name().as_ref() == b"p:cNvPr" => {
                    claim_frame(&mut frames, &mut claimed, &e, name);
                }
                Event::End(e) => match e.name().as_ref() {
                    b"p:sp" => {
                        frames.pop();
                    }
                    b"a:t" => in_text = false,
                    _ => {}
                },
                Event::Text(t) if in_text => {
                    collected.push_str(&t.unescape().ok()?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Some(collected)
    }

    fn replace_xml(&mut self, out: Writer<Cursor<Vec<u8>>>) -> Result<()> {
        self.xml = String::from_utf8(out.into_inner().into_inner())
            .map_err(|e| PptxError::invalid_deck(format!("rewritten slide is not UTF-8: {}", e)))?;
        Ok(())
    }
}

/// Index the named shapes on a slide
fn scan_shapes(xml: &str) -> Result<Vec<ShapeInfo>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut shapes = Vec::new();
    let mut stack: Vec<PendingShape> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"p:sp" => {
                stack.push(PendingShape::default());
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.name().as_ref() == b"p:cNvPr" =>
            {
                // only the shape's own properties carry its name
                if let Some(pending) = stack.last_mut() {
                    if pending.name.is_none() {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"name" {
                                if let Ok(value) = attr.unescape_value() {
                                    pending.name = Some(value.into_owned());
                                }
                            }
                        }
                    }
                }
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.name().as_ref() == b"a:bodyPr" =>
            {
                if let Some(pending) = stack.last_mut() {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"vert" {
                            if let Ok(value) = attr.unescape_value() {
                                if value == "vert" || value == "eaVert" {
                                    pending.vertical = true;
                                }
                            }
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"p:sp" => {
                if let Some(pending) = stack.pop() {
                    if let Some(name) = pending.name {
                        shapes.push(ShapeInfo {
                            name,
                            vertical: pending.vertical,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(shapes)
}

/// Mark the innermost open shape as the rewrite target when its name matches
fn claim_frame(frames: &mut [SpFrame], claimed: &mut bool, e: &BytesStart<'_>, wanted: &str) {
    let Some(frame) = frames.last_mut() else {
        return;
    };
    if frame.named {
        return;
    }
    frame.named = true;
    if *claimed {
        return;
    }
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            if let Ok(value) = attr.unescape_value() {
                if value == wanted {
                    frame.target = true;
                    *claimed = true;
                }
            }
        }
    }
}

fn target_open(frames: &[SpFrame]) -> bool {
    frames.last().is_some_and(|f| f.target)
}

/// Collect an element and its whole subtree as owned events
fn collect_subtree(
    reader: &mut Reader<&[u8]>,
    first: Event<'static>,
    buf: &mut Vec<u8>,
) -> Result<Vec<Event<'static>>> {
    let mut events = vec![first];
    if matches!(events[0], Event::Empty(_)) {
        return Ok(events);
    }

    let mut depth: usize = 0;
    loop {
        match reader.read_event_into(buf)? {
            Event::Start(e) => {
                depth += 1;
                events.push(Event::Start(e.into_owned()));
            }
            Event::End(e) => {
                events.push(Event::End(e.into_owned()));
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => {
                return Err(PptxError::invalid_deck("slide XML ends inside an element"));
            }
            ev => events.push(ev.into_owned()),
        }
        buf.clear();
    }

    Ok(events)
}

/// Locate the first element with this name and return its subtree
fn find_subtree(events: &[Event<'static>], name: &[u8]) -> Option<Vec<Event<'static>>> {
    for (i, ev) in events.iter().enumerate() {
        match ev {
            Event::Empty(e) if e.name().as_ref() == name => {
                return Some(vec![ev.clone()]);
            }
            Event::Start(e) if e.name().as_ref() == name => {
                let mut depth = 0usize;
                for (j, next) in events.iter().enumerate().skip(i + 1) {
                    match next {
                        Event::Start(_) => depth += 1,
                        Event::End(_) if depth == 0 => {
                            return Some(events[i..=j].to_vec());
                        }
                        Event::End(_) => depth -= 1,
                        _ => {}
                    }
                }
                return None;
            }
            _ => {}
        }
    }
    None
}

/// Rename paragraph end-properties into run properties, children untouched
fn rename_to_run_props(events: Vec<Event<'static>>) -> Vec<Event<'static>> {
    events
        .into_iter()
        .map(|ev| match ev {
            Event::Start(e) if e.name().as_ref() == b"a:endParaRPr" => {
                Event::Start(start_with_attrs("a:rPr", &e))
            }
            Event::Empty(e) if e.name().as_ref() == b"a:endParaRPr" => {
                Event::Empty(start_with_attrs("a:rPr", &e))
            }
            Event::End(e) if e.name().as_ref() == b"a:endParaRPr" => {
                Event::End(BytesEnd::new("a:rPr"))
            }
            other => other,
        })
        .collect()
}

/// Write the text body with its paragraphs replaced by a single run
fn write_replaced_body<W: Write>(
    out: &mut Writer<W>,
    body: &[Event<'static>],
    text: &str,
) -> Result<()> {
    if body.len() < 2 {
        for ev in body {
            out.write_event(ev.clone())?;
        }
        return Ok(());
    }

    out.write_event(body[0].clone())?;
    let inner = &body[1..body.len() - 1];

    // body settings and list styles precede the first paragraph
    let first_para = inner
        .iter()
        .position(|ev| {
            matches!(ev, Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"a:p")
        })
        .unwrap_or(inner.len());
    for ev in &inner[..first_para] {
        out.write_event(ev.clone())?;
    }

    let para_props = find_subtree(inner, b"a:pPr");
    let run_props = find_subtree(inner, b"a:rPr")
        .or_else(|| find_subtree(inner, b"a:endParaRPr").map(rename_to_run_props));

    out.write_event(Event::Start(BytesStart::new("a:p")))?;
    if let Some(props) = para_props {
        for ev in props {
            out.write_event(ev)?;
        }
    }
    out.write_event(Event::Start(BytesStart::new("a:r")))?;
    if let Some(props) = run_props {
        for ev in props {
            out.write_event(ev)?;
        }
    }
    out.write_event(Event::Start(BytesStart::new("a:t")))?;
    if !text.is_empty() {
        out.write_event(Event::Text(BytesText::new(text)))?;
    }
    out.write_event(Event::End(BytesEnd::new("a:t")))?;
    out.write_event(Event::End(BytesEnd::new("a:r")))?;
    out.write_event(Event::End(BytesEnd::new("a:p")))?;
    out.write_event(body[body.len() - 1].clone())?;
    Ok(())
}

/// Write shape properties with the transform replaced by the given rect
fn write_positioned_props<W: Write>(
    out: &mut Writer<W>,
    props: &[Event<'static>],
    rect: RectPt,
) -> Result<()> {
    if props.len() < 2 {
        for ev in props {
            out.write_event(ev.clone())?;
        }
        return Ok(());
    }

    out.write_event(props[0].clone())?;
    let inner = &props[1..props.len() - 1];

    let has_xfrm = inner.iter().any(|ev| {
        matches!(ev, Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"a:xfrm")
    });

    if !has_xfrm {
        // the transform slot comes first among the property children
        write_xfrm(out, rect)?;
        for ev in inner {
            out.write_event(ev.clone())?;
        }
    } else {
        let mut in_xfrm = false;
        for ev in inner {
            match ev {
                Event::Start(e) if e.name().as_ref() == b"a:xfrm" => {
                    in_xfrm = true;
                    out.write_event(ev.clone())?;
                    write_off_ext(out, rect)?;
                }
                Event::Empty(e) if e.name().as_ref() == b"a:xfrm" => {
                    out.write_event(Event::Start(start_with_attrs("a:xfrm", e)))?;
                    write_off_ext(out, rect)?;
                    out.write_event(Event::End(BytesEnd::new("a:xfrm")))?;
                }
                Event::End(e) if e.name().as_ref() == b"a:xfrm" => {
                    in_xfrm = false;
                    out.write_event(ev.clone())?;
                }
                Event::Empty(e)
                    if in_xfrm && matches!(e.name().as_ref(), b"a:off" | b"a:ext") => {}
                Event::Start(e)
                    if in_xfrm && matches!(e.name().as_ref(), b"a:off" | b"a:ext") => {}
                Event::End(e)
                    if in_xfrm && matches!(e.name().as_ref(), b"a:off" | b"a:ext") => {}
                _ => out.write_event(ev.clone())?,
            }
        }
    }

    out.write_event(props[props.len() - 1].clone())?;
    Ok(())
}

fn write_xfrm<W: Write>(out: &mut Writer<W>, rect: RectPt) -> Result<()> {
    out.write_event(Event::Start(BytesStart::new("a:xfrm")))?;
    write_off_ext(out, rect)?;
    out.write_event(Event::End(BytesEnd::new("a:xfrm")))?;
    Ok(())
}

fn write_off_ext<W: Write>(out: &mut Writer<W>, rect: RectPt) -> Result<()> {
    let mut off = BytesStart::new("a:off");
    off.push_attribute(("x", pt_to_emu(rect.left).to_string().as_str()));
    off.push_attribute(("y", pt_to_emu(rect.top).to_string().as_str()));
    out.write_event(Event::Empty(off))?;

    let mut ext = BytesStart::new("a:ext");
    ext.push_attribute(("cx", pt_to_emu(rect.width).to_string().as_str()));
    ext.push_attribute(("cy", pt_to_emu(rect.height).to_string().as_str()));
    out.write_event(Event::Empty(ext))?;
    Ok(())
}

/// Start tag with the given name, carrying the event's attributes verbatim
fn start_with_attrs(name: &str, e: &BytesStart<'_>) -> BytesStart<'static> {
    let mut out = BytesStart::new(name.to_string());
    for attr in e.attributes().flatten() {
        out.push_attribute(attr);
    }
    out
}

/// Copy of a run-properties tag with its `sz` forced to the given value
fn with_font_sz(e: &BytesStart<'_>, sz: u32) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() != b"sz" {
            out.push_attribute(attr);
        }
    }
    out.push_attribute(("sz", sz.to_string().as_str()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE_NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

    fn slide_xml(shapes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
            SLIDE_NS, shapes
        )
    }

    fn shape_xml(id: u32, name: &str, paragraphs: &str) -> String {
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="100" y="200"/><a:ext cx="300" cy="400"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
            id, name, paragraphs
        )
    }

    fn vertical_shape_xml(id: u32, name: &str, vert: &str, paragraphs: &str) -> String {
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr vert="{}"/><a:lstStyle/>{}</p:txBody></p:sp>"#,
            id, name, vert, paragraphs
        )
    }

    fn plain_run(text: &str) -> String {
        format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", text)
    }

    #[test]
    fn test_scan_finds_named_shapes() {
        let xml = slide_xml(&format!(
            "{}{}",
            shape_xml(2, "Point 01.01", &plain_run("XX")),
            shape_xml(3, "Cabinet 01", &plain_run("YY"))
        ));
        let part = SlidePart::parse(1, xml).unwrap();

        let names: Vec<_> = part.shape_names().collect();
        assert_eq!(names, vec!["Point 01.01", "Cabinet 01"]);
        assert!(part.has_shape("Point 01.01"));
        assert!(!part.has_shape("Point 01.02"));
        // the shape tree's own properties are not a shape
        assert!(!part.has_shape(""));
    }

    #[test]
    fn test_scan_flags_vertical_text() {
        let xml = slide_xml(&format!(
            "{}{}{}",
            vertical_shape_xml(2, "East Asian", "eaVert", &plain_run("A")),
            vertical_shape_xml(3, "Rotated", "vert", &plain_run("B")),
            vertical_shape_xml(4, "Horizontal", "horz", &plain_run("C"))
        ));
        let part = SlidePart::parse(1, xml).unwrap();

        assert!(part.shape("East Asian").unwrap().vertical);
        assert!(part.shape("Rotated").unwrap().vertical);
        assert!(!part.shape("Horizontal").unwrap().vertical);
    }

    #[test]
    fn test_set_text_keeps_run_and_paragraph_properties() {
        let xml = slide_xml(&shape_xml(
            2,
            "Point 01.01",
            r#"<a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="2000" b="1"/><a:t>XX</a:t></a:r></a:p>"#,
        ));
        let mut part = SlidePart::parse(1, xml).unwrap();

        let write = part.set_text("Point 01.01", "4.5").unwrap();
        assert_eq!(write, TextWrite::Applied);
        assert_eq!(part.shape_text("Point 01.01").as_deref(), Some("4.5"));
        assert!(part.xml().contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(part
            .xml()
            .contains(r#"<a:rPr lang="en-US" sz="2000" b="1"/>"#));
        assert!(part.xml().contains("<a:t>4.5</a:t>"));
    }

    #[test]
    fn test_set_text_collapses_extra_paragraphs() {
        let xml = slide_xml(&shape_xml(
            2,
            "LOTO Amount 01",
            r#"<a:p><a:r><a:rPr sz="1800"/><a:t>A</a:t></a:r></a:p><a:p><a:r><a:t>B</a:t></a:r></a:p>"#,
        ));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_text("LOTO Amount 01", "3").unwrap();
        assert_eq!(part.xml().matches("<a:p>").count(), 1);
        assert_eq!(part.shape_text("LOTO Amount 01").as_deref(), Some("3"));
    }

    #[test]
    fn test_set_text_adopts_paragraph_end_properties() {
        let xml = slide_xml(&shape_xml(
            2,
            "Cabinet 01",
            r#"<a:p><a:endParaRPr lang="en-US" sz="1000" dirty="0"/></a:p>"#,
        ));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_text("Cabinet 01", "K7").unwrap();
        assert!(part
            .xml()
            .contains(r#"<a:rPr lang="en-US" sz="1000" dirty="0"/>"#));
        assert!(!part.xml().contains("endParaRPr"));
        assert_eq!(part.shape_text("Cabinet 01").as_deref(), Some("K7"));
    }

    #[test]
    fn test_set_text_escapes_markup() {
        let xml = slide_xml(&shape_xml(2, "Cabinet 01", &plain_run("XX")));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_text("Cabinet 01", "R&D <Plant 2>").unwrap();
        assert!(part.xml().contains("R&amp;D &lt;Plant 2&gt;"));
        assert_eq!(
            part.shape_text("Cabinet 01").as_deref(),
            Some("R&D <Plant 2>")
        );
    }

    #[test]
    fn test_set_text_empty_string_clears() {
        let xml = slide_xml(&shape_xml(2, "Point 01.04", &plain_run("stale")));
        let mut part = SlidePart::parse(1, xml).unwrap();

        let write = part.set_text("Point 01.04", "").unwrap();
        assert_eq!(write, TextWrite::Applied);
        assert!(part.xml().contains("<a:t></a:t>"));
        assert_eq!(part.shape_text("Point 01.04").as_deref(), Some(""));
    }

    #[test]
    fn test_set_text_skips_vertical_and_preserves_bytes() {
        let xml = slide_xml(&vertical_shape_xml(
            2,
            "LOTO Amount 01",
            "eaVert",
            &plain_run("template"),
        ));
        let mut part = SlidePart::parse(1, xml.clone()).unwrap();

        let write = part.set_text("LOTO Amount 01", "9").unwrap();
        assert_eq!(write, TextWrite::SkippedVertical);
        assert_eq!(part.xml(), xml);
        assert_eq!(part.shape_text("LOTO Amount 01").as_deref(), Some("template"));
    }

    #[test]
    fn test_set_text_missing_shape_errors() {
        let xml = slide_xml(&shape_xml(2, "Point 01.01", &plain_run("XX")));
        let mut part = SlidePart::parse(7, xml).unwrap();

        let err = part.set_text("Point 02.01", "x").unwrap_err();
        assert!(matches!(err, PptxError::ShapeNotFound { slide: 7, .. }));
    }

    #[test]
    fn test_set_text_requires_a_text_body() {
        let bare = r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Bare"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>"#;
        let mut part = SlidePart::parse(1, slide_xml(bare)).unwrap();

        let err = part.set_text("Bare", "x").unwrap_err();
        assert!(matches!(err, PptxError::InvalidDeck { .. }));
    }

    #[test]
    fn test_set_geometry_rewrites_offsets() {
        let xml = slide_xml(&shape_xml(2, "Point 01.01", &plain_run("XX")));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_geometry(
            "Point 01.01",
            RectPt {
                left: 2.0,
                top: 63.0,
                width: 450.43,
                height: 34.02,
            },
        )
        .unwrap();

        assert!(part.xml().contains(r#"<a:off x="25400" y="800100"/>"#));
        assert!(part.xml().contains(r#"<a:ext cx="5720461" cy="432054"/>"#));
        assert!(!part.xml().contains(r#"x="100""#));
        // neighbouring geometry is untouched
        assert!(part.xml().contains(r#"<a:prstGeom prst="rect">"#));
    }

    #[test]
    fn test_set_geometry_inserts_missing_transform() {
        let inherited = r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Cabinet 01"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>X</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let mut part = SlidePart::parse(1, slide_xml(inherited)).unwrap();

        part.set_geometry(
            "Cabinet 01",
            RectPt {
                left: 2.0,
                top: 420.0,
                width: 134.12,
                height: 21.83,
            },
        )
        .unwrap();

        let xml = part.xml();
        assert!(xml.contains(r#"<a:xfrm><a:off x="25400" y="5334000"/><a:ext cx="1703324" cy="277241"/></a:xfrm>"#));
        let xfrm_at = xml.find("<a:xfrm>").unwrap();
        let geom_at = xml.find("<a:prstGeom").unwrap();
        assert!(xfrm_at < geom_at);
    }

    #[test]
    fn test_set_geometry_preserves_rotation() {
        let rotated = r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Point 01.02"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm rot="5400000" flipH="1"><a:off x="1" y="1"/><a:ext cx="2" cy="2"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:p><a:r><a:t>X</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let mut part = SlidePart::parse(1, slide_xml(rotated)).unwrap();

        part.set_geometry(
            "Point 01.02",
            RectPt {
                left: 507.0,
                top: 245.0,
                width: 450.43,
                height: 34.02,
            },
        )
        .unwrap();

        assert!(part.xml().contains(r#"<a:xfrm rot="5400000" flipH="1">"#));
        assert!(part.xml().contains(r#"<a:off x="6438900" y="3111500"/>"#));
    }

    #[test]
    fn test_set_geometry_only_touches_the_named_shape() {
        let xml = slide_xml(&format!(
            "{}{}",
            shape_xml(2, "Point 01.01", &plain_run("A")),
            shape_xml(3, "Point 01.02", &plain_run("B"))
        ));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_geometry(
            "Point 01.02",
            RectPt {
                left: 2.0,
                top: 63.0,
                width: 1.0,
                height: 1.0,
            },
        )
        .unwrap();

        // first shape keeps its original coordinates
        assert!(part.xml().contains(r#"<a:off x="100" y="200"/>"#));
        assert!(part.xml().contains(r#"<a:off x="25400" y="800100"/>"#));
    }

    #[test]
    fn test_set_font_size_rewrites_all_runs() {
        let xml = slide_xml(&shape_xml(
            2,
            "Cabinet 01",
            r#"<a:p><a:r><a:rPr lang="en-US" sz="1800" b="1"/><a:t>A</a:t></a:r><a:r><a:rPr lang="en-US"/><a:t>B</a:t></a:r><a:endParaRPr sz="1800"/></a:p>"#,
        ));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_font_size("Cabinet 01", 10.0).unwrap();

        assert!(!part.xml().contains("1800"));
        assert!(part
            .xml()
            .contains(r#"<a:rPr lang="en-US" b="1" sz="1000"/>"#));
        assert!(part.xml().contains(r#"<a:rPr lang="en-US" sz="1000"/>"#));
        assert!(part.xml().contains(r#"<a:endParaRPr sz="1000"/>"#));
    }

    #[test]
    fn test_set_font_size_adds_properties_to_bare_run() {
        let xml = slide_xml(&shape_xml(2, "LOTO Amount 01", &plain_run("A")));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_font_size("LOTO Amount 01", 22.0).unwrap();
        assert!(part
            .xml()
            .contains(r#"<a:r><a:rPr sz="2200"/><a:t>A</a:t></a:r>"#));
    }

    #[test]
    fn test_set_font_size_leaves_other_shapes_alone() {
        let xml = slide_xml(&format!(
            "{}{}",
            shape_xml(2, "Point 01.01", r#"<a:p><a:r><a:rPr sz="2000"/><a:t>A</a:t></a:r></a:p>"#),
            shape_xml(3, "Cabinet 01", r#"<a:p><a:r><a:rPr sz="2000"/><a:t>B</a:t></a:r></a:p>"#)
        ));
        let mut part = SlidePart::parse(1, xml).unwrap();

        part.set_font_size("Cabinet 01", 10.0).unwrap();
        assert!(part.xml().contains(r#"<a:rPr sz="2000"/>"#));
        assert!(part.xml().contains(r#"<a:rPr sz="1000"/>"#));
    }

    #[test]
    fn test_rewrites_are_idempotent() {
        let xml = slide_xml(&shape_xml(
            2,
            "Point 01.01",
            r#"<a:p><a:r><a:rPr sz="2000"/><a:t>old</a:t></a:r></a:p>"#,
        ));
        let mut part = SlidePart::parse(1, xml).unwrap();
        let rect = RectPt {
            left: 2.0,
            top: 63.0,
            width: 450.43,
            height: 34.02,
        };

        part.set_text("Point 01.01", "4.5").unwrap();
        part.set_geometry("Point 01.01", rect).unwrap();
        part.set_font_size("Point 01.01", 20.0).unwrap();
        let first = part.xml().to_string();

        part.set_text("Point 01.01", "4.5").unwrap();
        part.set_geometry("Point 01.01", rect).unwrap();
        part.set_font_size("Point 01.01", 20.0).unwrap();
        assert_eq!(part.xml(), first);
    }

    #[test]
    fn test_shape_text_joins_runs_and_paragraphs() {
        let xml = slide_xml(&shape_xml(
            2,
            "Point 01.01",
            r#"<a:p><a:r><a:t>A</a:t></a:r><a:r><a:t>B</a:t></a:r></a:p><a:p><a:r><a:t>C</a:t></a:r></a:p>"#,
        ));
        let part = SlidePart::parse(1, xml).unwrap();

        assert_eq!(part.shape_text("Point 01.01").as_deref(), Some("AB\nC"));
        assert_eq!(part.shape_text("Nope"), None);
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(pt_to_emu(1.0), 12_700);
        assert_eq!(pt_to_emu(2.0), 25_400);
        assert_eq!(pt_to_emu(450.43), 5_720_461);
        assert_eq!(pt_to_emu(34.02), 432_054);
        assert_eq!(pt_to_sz(20.0), 2000);
        assert_eq!(pt_to_sz(22.0), 2200);
        assert_eq!(pt_to_sz(10.0), 1000);
    }
}
