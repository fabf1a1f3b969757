use anycanvas_skia::SkiaCanvas;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bawiki_font::FontBook;

use crate::assets::LogoAssets;
use crate::error::LogoError;
use crate::layout::LogoLayout;
use crate::paint::{LabelOutlines, LogoOptions, paint_logo};
use crate::style::LogoStyle;

/// Scheme marker prefixed to the serialized payload, understood by the
/// message host that embeds the image.
pub const BASE64_SCHEME: &str = "base64://";

/// Front door of the compositor: fonts + graphics + style, reusable
/// across renders. Individual renders share nothing with each other.
pub struct LogoRenderer {
    fonts: FontBook,
    assets: LogoAssets,
    style: LogoStyle,
}

impl LogoRenderer {
    pub fn new(fonts: FontBook, assets: LogoAssets) -> Self {
        Self {
            fonts,
            assets,
            style: LogoStyle::default(),
        }
    }

    pub fn with_style(mut self, style: LogoStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &LogoStyle {
        &self.style
    }

    /// Compose the logo for the two labels and serialize it.
    ///
    /// Returns the PNG payload base64-encoded behind [`BASE64_SCHEME`].
    pub fn render(
        &self,
        text_l: &str,
        text_r: &str,
        opts: &LogoOptions,
    ) -> Result<String, LogoError> {
        let families: Vec<&str> = self.style.font_families.iter().map(String::as_str).collect();
        let stack = self.fonts.resolve(&families)?;

        let metrics_l = stack.measure(text_l, self.style.font_size);
        let metrics_r = stack.measure(text_r, self.style.font_size);
        let layout = LogoLayout::compute(&self.style, &metrics_l, &metrics_r);
        log::debug!(
            "logo layout: columns {:.1}+{:.1}, crop: {}",
            layout.col_width_l,
            layout.col_width_r,
            layout.needs_crop(&self.style)
        );

        let surface_w = layout.width as u32;
        let surface_h = layout.height as u32;
        let mut canvas =
            SkiaCanvas::new(surface_w, surface_h).ok_or(LogoError::Surface(surface_w, surface_h))?;

        let labels = LabelOutlines {
            left: stack.outline(text_l, self.style.font_size),
            left_width: metrics_l.width,
            right: stack.outline(text_r, self.style.font_size),
        };
        paint_logo(&mut canvas, &self.style, &layout, &self.assets, &labels, opts);

        let output = if layout.needs_crop(&self.style) {
            let (crop_w, crop_h) = layout.cropped_size(&self.style);
            let (crop_w, crop_h) = (crop_w as u32, crop_h as u32);
            canvas
                .copy_region(
                    layout.crop_origin_x(&self.style).round() as i32,
                    0,
                    crop_w,
                    crop_h,
                )
                .ok_or(LogoError::Surface(crop_w, crop_h))?
        } else {
            canvas
        };

        let png = output.encode_png()?;
        Ok(format!("{BASE64_SCHEME}{}", BASE64.encode(&png)))
    }
}
