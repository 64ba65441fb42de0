use indicatif::MultiProgress;

const INDENT_SIZE: usize = 2;

pub struct BulletPointPrinter<W: LineWriter + Clone> {
    writer: W,
    nesting: usize,
}

impl<W: LineWriter + Clone> BulletPointPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, nesting: 0 }
    }

    pub fn print_item(&self, message: impl std::fmt::Display) {
        let indent = " ".repeat(self.nesting * INDENT_SIZE);
        self.writer.write_line(&format!("{}• {}", indent, message));
    }

    pub fn indent(&self) -> Self {
        Self {
            writer: self.writer.clone(),
            nesting: self.nesting + 1,
        }
    }
}

impl BulletPointPrinter<StdoutLineWriter> {
    pub fn new_stdout() -> Self {
        Self::new(StdoutLineWriter)
    }
}

impl<'a> BulletPointPrinter<MultiProgressLineWriter<'a>> {
    pub fn new_multiprogress(mp: &'a MultiProgress) -> Self {
        Self::new(MultiProgressLineWriter {
            mp,
            fallback: StdoutLineWriter,
        })
    }
}

pub trait LineWriter {
    fn write_line(&self, line: &str);
}

#[derive(Clone, Copy)]
pub struct StdoutLineWriter;
impl LineWriter for StdoutLineWriter {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}

/// Prints above the progress bars so the lines don't get overwritten.
/// A hidden `MultiProgress` (e.g. stderr is not a terminal) swallows its lines, so those go to `fallback`.
#[derive(Clone, Copy)]
pub struct MultiProgressLineWriter<'a, F: LineWriter = StdoutLineWriter> {
    mp: &'a MultiProgress,
    fallback: F,
}

impl<'a, F: LineWriter> LineWriter for MultiProgressLineWriter<'a, F> {
    fn write_line(&self, line: &str) {
        if self.mp.is_hidden() || self.mp.println(line).is_err() {
            self.fallback.write_line(line);
        }
    }
}
