use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::document::{TrackDocument, TrackNode};
use crate::error::DocumentError;

/// One element of a parsed GPX file with its attributes, direct text and
/// child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(e: &BytesStart) -> Self {
        let attributes = e
            .attributes()
            .flatten()
            .map(|attr| {
                (
                    String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                    String::from_utf8_lossy(&attr.value).into_owned(),
                )
            })
            .collect();

        Element {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            attributes,
            ..Default::default()
        }
    }
}

/// A GPX file held in memory as an element tree.
#[derive(Debug, Default)]
pub struct XmlDocument {
    root: Option<Element>,
}

impl XmlDocument {
    pub fn parse(input: &[u8]) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_reader(input);
        let mut buf = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            let event = match reader.read_event_into(&mut buf) {
                Err(source) => {
                    return Err(DocumentError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    });
                }
                Ok(Event::Eof) => break,
                Ok(event) => event,
            };

            match event {
                Event::Start(ref e) => open.push(Element::from_start(e)),

                Event::Empty(ref e) => attach(&mut open, &mut root, Element::from_start(e)),

                Event::End(ref e) => {
                    let element = open.pop().ok_or_else(|| {
                        DocumentError::Unbalanced(String::from_utf8_lossy(e.name().as_ref()).into_owned())
                    })?;
                    attach(&mut open, &mut root, element);
                }

                Event::Text(ref e) => {
                    if let Some(current) = open.last_mut()
                        && let Ok(text) = std::str::from_utf8(e)
                    {
                        current.text.push_str(text);
                    }
                }

                Event::CData(ref e) => {
                    if let Some(current) = open.last_mut()
                        && let Ok(text) = std::str::from_utf8(e)
                    {
                        current.text.push_str(text);
                    }
                }

                _ => {}
            }

            buf.clear();
        }

        if let Some(unclosed) = open.pop() {
            return Err(DocumentError::Unbalanced(unclosed.name));
        }

        Ok(XmlDocument { root })
    }

    pub fn root_element(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}

// Only the first top-level element becomes the root.
fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    }
}

impl TrackDocument for XmlDocument {
    type Node<'a> = ElementRef<'a>;

    fn root(&self) -> Option<ElementRef<'_>> {
        self.root.as_ref().map(|root| ElementRef {
            siblings: std::slice::from_ref(root),
            index: 0,
        })
    }
}

/// Position of an element among its siblings.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    siblings: &'a [Element],
    index: usize,
}

impl<'a> ElementRef<'a> {
    pub fn element(&self) -> &'a Element {
        &self.siblings[self.index]
    }

    fn find(siblings: &'a [Element], from: usize, tag: Option<&str>) -> Option<Self> {
        siblings
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, element)| tag.is_none_or(|tag| element.name == tag))
            .map(|(index, _)| ElementRef { siblings, index })
    }
}

impl TrackNode for ElementRef<'_> {
    fn first_child(&self, tag: Option<&str>) -> Option<Self> {
        ElementRef::find(&self.element().children, 0, tag)
    }

    fn next_sibling(&self, tag: Option<&str>) -> Option<Self> {
        ElementRef::find(self.siblings, self.index + 1, tag)
    }

    fn attr(&self, name: &str) -> Option<f64> {
        self.element()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.trim().parse().ok())
    }

    fn text(&self) -> Option<String> {
        let text = self.element().text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}
