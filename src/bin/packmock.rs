//! Command-line mockup exporter.
//!
//! Loads a template and schema from JSON, applies edits from the command
//! line, and writes the rendered mockup to a PNG or JPEG file.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use packmock_renderer::{
    encode, export_file_name, CustomizationSchema, EditorSession, ExportFormat, MockupRenderer,
    RenderOptions, Template, UploadSource, UploadedImage,
};

#[derive(Parser)]
#[command(
    name = "packmock",
    about = "Render a package mockup from a template and customization schema"
)]
struct Args {
    /// Template record (JSON).
    #[arg(long)]
    template: PathBuf,

    /// Customization schema (JSON).
    #[arg(long)]
    schema: PathBuf,

    /// Override an element value, as elementId=value. Repeatable.
    #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_key_val)]
    set: Vec<(String, String)>,

    /// Apply a named color scheme after defaults.
    #[arg(long)]
    scheme: Option<String>,

    /// Attach an image file to an element, as elementId=path. Repeatable.
    #[arg(long = "image", value_name = "ID=PATH", value_parser = parse_key_val)]
    image: Vec<(String, String)>,

    /// TTF/OTF font used for text elements.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output file; the extension picks PNG or JPEG.
    /// Defaults to a name derived from the template.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = 800.0)]
    max_width: f32,

    #[arg(long, default_value_t = 600.0)]
    max_height: f32,

    #[arg(long, default_value_t = 2.0)]
    scale_cap: f32,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let template = Template::from_json(&fs::read_to_string(&args.template)?)?;
    let schema = CustomizationSchema::from_json(&fs::read_to_string(&args.schema)?)?;

    let mut session = EditorSession::from_schema(&schema);
    if let Some(scheme) = &args.scheme {
        if !session.apply_scheme(&schema, scheme) {
            return Err(format!("no color scheme named {scheme:?}").into());
        }
    }
    for (element_id, value) in &args.set {
        if !session.set_value(&schema, element_id, value) {
            return Err(format!("no editable element with id {element_id:?}").into());
        }
    }
    for (element_id, path) in &args.image {
        let bytes = fs::read(path)?;
        let bitmap = packmock_renderer::decode_upload(&bytes, "", path)?;
        session.attach_upload(
            element_id,
            UploadedImage::new(
                bitmap,
                UploadSource {
                    file_name: path.clone(),
                    mime: String::new(),
                },
            ),
        );
    }

    let options = RenderOptions {
        max_view_width: args.max_width,
        max_view_height: args.max_height,
        scale_cap: args.scale_cap,
    };
    let mut renderer = MockupRenderer::new(&template, options);
    if let Some(font_path) = &args.font {
        let bytes = fs::read(font_path)?;
        renderer.set_font_bytes(&bytes).map_err(|e| e.to_string())?;
    }
    renderer.render(&template, &schema, &session);

    let format = args
        .out
        .as_deref()
        .and_then(|p| p.extension())
        .map(|ext| ExportFormat::from_extension(&ext.to_string_lossy()))
        .unwrap_or(ExportFormat::Png);
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(export_file_name(&template.name, format)));

    let bytes = encode(renderer.surface().image(), format)?;
    fs::write(&out, bytes)?;
    println!(
        "wrote {} ({}x{})",
        out.display(),
        renderer.surface().image().width(),
        renderer.surface().image().height()
    );

    Ok(())
}
