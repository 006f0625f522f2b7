/// Indentation-aware text buffer for emitting C# source.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buffer: String,
    indent_level: usize,
}

const INDENT: &str = "    ";

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one indented line.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.blank();
            return;
        }
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Write an empty line without trailing whitespace.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Write each line of `text` as a `///` comment.
    pub fn doc(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(&format!("/// {}", line));
            }
        }
    }

    /// Open a `{` block and indent.
    pub fn open(&mut self) {
        self.line("{");
        self.indent();
    }

    /// Dedent and close a `}` block.
    pub fn close(&mut self) {
        self.dedent();
        self.line("}");
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_and_indentation() {
        let mut writer = CodeWriter::new();
        writer.line("namespace Demo");
        writer.open();
        writer.line("interface IFoo");
        writer.open();
        writer.close();
        writer.blank();
        writer.close();

        assert_eq!(
            writer.finish(),
            "namespace Demo\n{\n    interface IFoo\n    {\n    }\n\n}\n"
        );
    }

    #[test]
    fn test_doc_lines() {
        let mut writer = CodeWriter::new();
        writer.indent();
        writer.doc("<summary>\nHello  \n\n</summary>");
        assert_eq!(
            writer.finish(),
            "    /// <summary>\n    /// Hello\n    ///\n    /// </summary>\n"
        );
    }

    #[test]
    fn test_dedent_saturates() {
        let mut writer = CodeWriter::new();
        writer.dedent();
        writer.line("x");
        assert_eq!(writer.finish(), "x\n");
    }
}
