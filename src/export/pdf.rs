// ==========================================
// 米厂报表客户端 - PDF 写出
// ==========================================
// 职责: ReportDocument -> PDF 1.4 字节（A4 纵向，单位 mm）
// 版式:
// - 每页绘制边框 rect(10, 10, 190, 277)
// - 标题 18pt 粗体；分区标题灰底 14pt；说明 10pt 按 180mm 折行
// - 表格斑马纹，表头底色 (22,160,133)，左右边距 14mm
// - 垂直游标越过页底时自动分页，表格在新页重复表头
// 字体: 内置 Helvetica / Helvetica-Bold（WinAnsi），不可编码的字符被丢弃
// ==========================================

use crate::report::document::{BlockBody, ReportDocument};

// ===== 页面几何 (mm) =====
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const BORDER: (f64, f64, f64, f64) = (10.0, 10.0, 190.0, 277.0);
const MARGIN_LEFT: f64 = 14.0;
const MARGIN_RIGHT: f64 = 14.0;
const TOP_Y: f64 = 20.0;
const BOTTOM_LIMIT: f64 = 280.0;

// ===== 文本 =====
const TITLE_SIZE: f64 = 18.0;
const SECTION_TITLE_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 10.0;
const DESCRIPTION_WIDTH: f64 = 180.0;
const LINE_STEP: f64 = 5.0;

// ===== 表格 =====
const CELL_PADDING: f64 = 1.76;
const CELL_LINE_HEIGHT: f64 = 4.06;
const HEADER_FILL: Rgb = Rgb(22, 160, 133);
const STRIPE_FILL: Rgb = Rgb(245, 245, 245);
const SECTION_FILL: Rgb = Rgb(230, 230, 230);

const BLACK: Rgb = Rgb(0, 0, 0);
const WHITE: Rgb = Rgb(255, 255, 255);
const SECTION_TEXT: Rgb = Rgb(40, 40, 40);
const DESCRIPTION_TEXT: Rgb = Rgb(80, 80, 80);
const CELL_TEXT: Rgb = Rgb(50, 50, 50);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    fn components(&self) -> String {
        format!(
            "{:.3} {:.3} {:.3}",
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

// ==========================================
// 文本编码与度量
// ==========================================

/// 单个字符的 WinAnsi 编码；内置字体无此字形时返回 None
fn encode_char(c: char) -> Option<u8> {
    match c {
        '\t' => Some(b' '),
        ' '..='~' => Some(c as u8),
        '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        '€' => Some(0x80),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        _ => None,
    }
}

/// UTF-8 -> WinAnsi 字节，转义 PDF 字符串定界符
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for b in text.chars().filter_map(encode_char) {
        if matches!(b, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}

/// 文本能否用内置 Helvetica 完整输出
pub fn is_encodable(text: &str) -> bool {
    text.chars().all(|c| encode_char(c).is_some())
}

/// 文档标题、分区标题、说明与字段标签是否都能完整输出
///
/// 表格单元格来自后端数据，不参与判断
pub fn headings_encodable(document: &ReportDocument) -> bool {
    is_encodable(&document.title)
        && document.blocks.iter().all(|block| {
            is_encodable(&block.title)
                && is_encodable(&block.description)
                && match &block.body {
                    BlockBody::Fields(fields) => fields.iter().all(|(label, _)| is_encodable(label)),
                    BlockBody::Table { headers, .. } => headers.iter().all(|h| is_encodable(h)),
                }
        })
}

/// Helvetica 近似字宽（em）
fn char_em(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | '\'' | '|' | '!' | ':' | ';' => 0.25,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '-' | '/' => 0.33,
        'm' | 'w' | 'M' | 'W' | '%' | '@' => 0.85,
        'A'..='Z' | '&' => 0.68,
        _ => 0.55,
    }
}

fn text_width(text: &str, size: f64) -> f64 {
    let em: f64 = text.chars().map(char_em).sum();
    em * size * 25.4 / 72.0
}

/// 贪心折行；超长单词独占一行
fn wrap_text(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ==========================================
// PdfCanvas - 页面绘制 + 自动分页
// ==========================================
pub struct PdfCanvas {
    pages: Vec<Vec<u8>>,
    cursor_y: f64,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        let mut canvas = Self {
            pages: Vec::new(),
            cursor_y: TOP_Y,
        };
        canvas.add_page();
        canvas
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    /// 新起一页并重绘边框
    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = TOP_Y;
        let (x, y, w, h) = BORDER;
        self.op(format!("0.85 w {} RG\n", BLACK.components()));
        self.rect(x, y, w, h, false);
    }

    /// 剩余空间不足时分页
    ///
    /// # 返回
    /// 是否发生了分页
    fn ensure_space(&mut self, height: f64) -> bool {
        if self.cursor_y + height > BOTTOM_LIMIT {
            self.add_page();
            true
        } else {
            false
        }
    }

    fn op(&mut self, s: String) {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        self.pages[last].extend_from_slice(s.as_bytes());
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: bool) {
        let paint = if fill { "f" } else { "S" };
        self.op(format!(
            "{:.2} {:.2} {:.2} {:.2} re {}\n",
            mm_to_pt(x),
            mm_to_pt(PAGE_HEIGHT - y - h),
            mm_to_pt(w),
            mm_to_pt(h),
            paint
        ));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.op(format!("{} rg\n", color.components()));
        self.rect(x, y, w, h, true);
    }

    /// y 为基线位置
    fn text(&mut self, x: f64, y: f64, font: Font, size: f64, color: Rgb, text: &str) {
        let encoded = encode_text(text);
        if encoded.is_empty() {
            return;
        }
        self.op(format!(
            "BT /{} {:.1} Tf {} rg {:.2} {:.2} Td (",
            font.resource(),
            size,
            color.components(),
            mm_to_pt(x),
            mm_to_pt(PAGE_HEIGHT - y)
        ));
        if let Some(page) = self.pages.last_mut() {
            page.extend_from_slice(&encoded);
        }
        self.op(") Tj ET\n".to_string());
    }

    // ===== 报表元素 =====

    pub fn document_title(&mut self, title: &str) {
        self.text(MARGIN_LEFT, self.cursor_y, Font::Bold, TITLE_SIZE, BLACK, title);
        self.cursor_y += 10.0;
    }

    pub fn section_title(&mut self, title: &str) {
        self.ensure_space(12.0);
        let y = self.cursor_y;
        self.fill_rect(MARGIN_LEFT, y, PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT, 8.0, SECTION_FILL);
        self.text(16.0, y + 6.0, Font::Bold, SECTION_TITLE_SIZE, SECTION_TEXT, title);
        self.cursor_y += 12.0;
    }

    pub fn description(&mut self, text: &str) {
        self.cursor_y += 3.0;
        for line in wrap_text(text, BODY_SIZE, DESCRIPTION_WIDTH) {
            self.ensure_space(LINE_STEP);
            self.text(MARGIN_LEFT, self.cursor_y, Font::Regular, BODY_SIZE, DESCRIPTION_TEXT, &line);
            self.cursor_y += LINE_STEP;
        }
        self.cursor_y += 6.0;
    }

    /// "标签: 值" 逐行输出
    pub fn fields(&mut self, fields: &[(String, String)]) {
        for (label, value) in fields {
            self.ensure_space(LINE_STEP);
            let line = format!("{}: {}", label, value);
            self.text(MARGIN_LEFT, self.cursor_y, Font::Regular, BODY_SIZE, BLACK, &line);
            self.cursor_y += LINE_STEP;
        }
        self.cursor_y += 5.0;
    }

    /// 斑马纹表格，分页时重复表头
    pub fn table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        let columns = headers.len().max(1);
        let table_width = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let col_width = table_width / columns as f64;
        let text_width_limit = col_width - 2.0 * CELL_PADDING;

        let layout = |cells: &[String]| -> (Vec<Vec<String>>, f64) {
            let wrapped: Vec<Vec<String>> = cells
                .iter()
                .map(|c| wrap_text(c, BODY_SIZE, text_width_limit))
                .collect();
            let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
            (wrapped, lines as f64 * CELL_LINE_HEIGHT + 2.0 * CELL_PADDING)
        };

        let (header_cells, header_height) = layout(headers);
        self.ensure_space(header_height);
        self.table_row(&header_cells, header_height, col_width, Some(HEADER_FILL), Font::Bold, WHITE);

        for (index, row) in rows.iter().enumerate() {
            let (cells, height) = layout(row);
            if self.ensure_space(height) {
                self.table_row(&header_cells, header_height, col_width, Some(HEADER_FILL), Font::Bold, WHITE);
            }
            let fill = (index % 2 == 1).then_some(STRIPE_FILL);
            self.table_row(&cells, height, col_width, fill, Font::Regular, CELL_TEXT);
        }
        self.cursor_y += 10.0;
    }

    fn table_row(
        &mut self,
        cells: &[Vec<String>],
        height: f64,
        col_width: f64,
        fill: Option<Rgb>,
        font: Font,
        color: Rgb,
    ) {
        let y = self.cursor_y;
        if let Some(fill) = fill {
            self.fill_rect(MARGIN_LEFT, y, col_width * cells.len().max(1) as f64, height, fill);
        }
        for (col, lines) in cells.iter().enumerate() {
            let x = MARGIN_LEFT + col as f64 * col_width + CELL_PADDING;
            for (i, line) in lines.iter().enumerate() {
                let baseline = y + CELL_PADDING + 3.0 + i as f64 * CELL_LINE_HEIGHT;
                self.text(x, baseline, font, BODY_SIZE, color, line);
            }
        }
        self.cursor_y += height;
    }

    /// 序列化为 PDF 字节
    pub fn finish(self) -> Vec<u8> {
        let page_count = self.pages.len();
        // 对象编号: 1 目录, 2 页树, 3/4 字体, 之后每页 (页, 内容流)
        let page_obj = |i: usize| 5 + i * 2;
        let mut objects: Vec<Vec<u8>> = Vec::new();

        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
        let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", page_obj(i))).collect();
        objects.push(
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), page_count).into_bytes(),
        );
        objects.push(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_vec(),
        );
        objects.push(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        );
        for (i, content) in self.pages.into_iter().enumerate() {
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                    mm_to_pt(PAGE_WIDTH),
                    mm_to_pt(PAGE_HEIGHT),
                    page_obj(i) + 1
                )
                .into_bytes(),
            );
            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(&content);
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);
        }

        let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }
        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_at
            )
            .as_bytes(),
        );
        out
    }
}

/// 绘制整份报表
pub fn render_report(document: &ReportDocument) -> PdfCanvas {
    let mut canvas = PdfCanvas::new();
    canvas.document_title(&document.title);
    for block in &document.blocks {
        canvas.section_title(&block.title);
        canvas.description(&block.description);
        match &block.body {
            BlockBody::Fields(fields) => canvas.fields(fields),
            BlockBody::Table { headers, rows } => canvas.table(headers, rows),
        }
    }
    tracing::debug!(
        blocks = document.blocks.len(),
        pages = canvas.page_count(),
        "PDF 版面完成"
    );
    canvas
}

/// ReportDocument -> PDF 字节
pub fn write_report(document: &ReportDocument) -> Vec<u8> {
    render_report(document).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SectionKey;
    use crate::report::document::ReportBlock;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn table_doc(rows: usize) -> ReportDocument {
        let mut doc = ReportDocument::new("Sales and Forecasting Report");
        doc.blocks.push(ReportBlock {
            key: SectionKey::ForecastTable,
            title: "Forecast (Next 30 Days)".to_string(),
            description: "Shows a 30-day forecast of rice sales including date-wise predicted quantities."
                .to_string(),
            body: BlockBody::Table {
                headers: vec!["Date".into(), "Rice Type".into(), "Forecast (KG)".into()],
                rows: (0..rows)
                    .map(|i| vec![format!("2025-07-{:02}", i % 28 + 1), "RED".into(), i.to_string()])
                    .collect(),
            },
        });
        doc
    }

    #[test]
    fn test_encode_text_escapes_and_drops() {
        assert_eq!(encode_text("a(b)\\"), b"a\\(b\\)\\\\".to_vec());
        assert_eq!(encode_text("R² ⚠️ OK"), b"R\xB2  OK".to_vec());
    }

    #[test]
    fn test_headings_encodable() {
        assert!(is_encodable("R² Score – Forecast (KG)"));
        assert!(!is_encodable("汇总概览"));

        let mut doc = table_doc(1);
        assert!(headings_encodable(&doc));
        doc.blocks[0].title = "预测表".to_string();
        assert!(!headings_encodable(&doc));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "Provides a high-level overview of total sales, revenue, most and least sold items, and average daily performance.";
        let lines = wrap_text(text, 10.0, 60.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l, 10.0) <= 60.0));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_small_report_single_page() {
        let bytes = write_report(&table_doc(3));
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert_eq!(count(&bytes, b"/Count 1 "), 1);
    }

    #[test]
    fn test_long_table_breaks_pages_with_border_each_page() {
        let canvas = render_report(&table_doc(120));
        let pages = canvas.page_count();
        assert!(pages > 1);
        let bytes = canvas.finish();
        // 边框是唯一的描边矩形
        assert_eq!(count(&bytes, b" re S\n"), pages);
        // 每页一个表头
        assert_eq!(count(&bytes, b"(Forecast \\(KG\\)) Tj"), pages);
    }
}
