use crate::error::{Error, Result};
use crate::models::quiz::Quiz;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 20.0;

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
const SUBTITLE_SIZE: f32 = 9.5;

// Rough character budget for an A4 text column in Helvetica.
const WRAP_WIDTH: usize = 90;

pub struct ExportService;

impl ExportService {
    /// Render a quiz into PDF bytes: numbered questions with lettered
    /// options in their original order, plus an optional answer key.
    /// Export never touches the in-memory quiz; a failure here is
    /// reported and nothing else.
    pub fn generate_quiz_pdf(quiz: &Quiz, include_answer_key: bool) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            &quiz.title,
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Export(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Export(e.to_string()))?;

        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
        };

        writer.line(&quiz.title, TITLE_SIZE, &bold);
        let subtitle = format!(
            "Topic: {}  |  Difficulty: {}  |  {} questions  |  {}",
            quiz.topic,
            quiz.difficulty,
            quiz.questions.len(),
            chrono::Utc::now().format("%Y-%m-%d"),
        );
        writer.line(&subtitle, SUBTITLE_SIZE, &regular);
        writer.gap(4.0);

        for q in &quiz.questions {
            let numbered = format!("{}. {}", q.id, q.question);
            for row in wrap_text(&numbered, WRAP_WIDTH) {
                writer.line(&row, BODY_SIZE, &bold);
            }
            for (i, option) in q.options.iter().enumerate() {
                let lettered = format!("     {}. {}", option_letter(i), option);
                for row in wrap_text(&lettered, WRAP_WIDTH) {
                    writer.line(&row, BODY_SIZE, &regular);
                }
            }
            writer.gap(3.0);
        }

        if include_answer_key {
            writer.new_page();
            writer.line("Answer Key", HEADING_SIZE, &bold);
            writer.gap(3.0);

            for q in &quiz.questions {
                let letter = q
                    .correct_index()
                    .map(option_letter)
                    .unwrap_or('?');
                let row = format!("{}. {}  -  {}", q.id, letter, q.correct_answer);
                for line in wrap_text(&row, WRAP_WIDTH) {
                    writer.line(&line, BODY_SIZE, &bold);
                }
                if let Some(explanation) = &q.explanation {
                    for line in wrap_text(explanation, WRAP_WIDTH) {
                        writer.line(&format!("     {}", line), SUBTITLE_SIZE, &regular);
                    }
                }
                writer.gap(2.0);
            }
        }

        doc.save_to_bytes().map_err(|e| Error::Export(e.to_string()))
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        let line_height = size * 0.55;
        if self.y - line_height < BOTTOM_MARGIN {
            self.new_page();
        }
        self.y -= line_height;
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }
}

fn option_letter(index: usize) -> char {
    if index < 26 {
        (b'A' + index as u8) as char
    } else {
        '?'
    }
}

/// Greedy word wrap. Words longer than the budget go on their own line
/// rather than being split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
