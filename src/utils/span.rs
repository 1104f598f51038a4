use annotate_snippets::{
	display_list::{DisplayList, FormatOptions},
	snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};
use std::fmt::Display;
use std::ops::Range;

/// Byte range in the whole proof text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GlobalSpan(pub Range<usize>);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Spanned<T> {
	pub span: GlobalSpan,
	pub inner: T,
}

impl<T> Spanned<T> {
	pub fn new(t: T, span: GlobalSpan) -> Self {
		Spanned {
			span,
			inner: t,
		}
	}

	pub fn map<Y, F: FnOnce(T) -> Y>(self, f: F) -> Spanned<Y> {
		Spanned {
			span: self.span,
			inner: f(self.inner),
		}
	}
}

impl<T: Display> Spanned<T> {
	/// Renders the error with the source line it points at. An empty span renders the message alone.
	pub fn to_snippet(&self, source: &str, origin: Option<&str>, color: bool) -> String {
		let text = self.inner.to_string();
		let opt = FormatOptions {
			color,
			..Default::default()
		};
		let title = Some(Annotation {
			label: Some(&text),
			id: None,
			annotation_type: AnnotationType::Error,
		});

		if self.span.0.is_empty() || self.span.0.start >= source.len() {
			let snippet = Snippet { title, opt, ..Snippet::default() };
			return DisplayList::from(snippet).to_string();
		}

		let (line_no, line) = find_line(source, self.span.0.start);
		let end = self.span.0.end.min(line.end);
		let snippet = Snippet {
			title,
			footer: vec![],
			slices: vec![
				Slice {
					source: &source[line.clone()],
					line_start: line_no,
					origin,
					fold: false,
					annotations: vec![
						SourceAnnotation {
							label: "",
							annotation_type: AnnotationType::Error,
							range: (
								char_count(source, line.start..self.span.0.start),
								char_count(source, line.start..end),
							),
						},
					],
				},
			],
			opt,
		};
		DisplayList::from(snippet).to_string()
	}
}

fn char_count(string: &str, range: Range<usize>) -> usize {
	string[range].chars().count()
}

/// 1-based number and byte range (without the newline) of the line containing `pos`.
fn find_line(string: &str, pos: usize) -> (usize, Range<usize>) {
	let start = string[..pos].rfind('\n').map_or(0, |index| index + 1);
	let end = string[pos..].find('\n').map_or(string.len(), |index| pos + index);
	let line_no = string[..start].matches('\n').count() + 1;
	(line_no, start..end)
}
