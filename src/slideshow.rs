//! Folder slideshow: render every image in a directory, skipping bad files.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::warn;

use crate::config::MatrixConfig;
use crate::error::DecodeError;
use crate::pipeline::RenderPipeline;
use crate::sink::DisplaySink;
use crate::storage::Storage;

/// Make one pass over `folder`, rendering each image with the config's
/// current brightness and waiting the configured delay after each.
///
/// A file that fails to decode is shown as an error on the panel and
/// skipped; the slideshow never halts on bad input. Only a failure to list
/// the folder itself is returned. The caller loops this forever.
pub fn run_folder<S: Storage>(
    pipeline: &mut RenderPipeline<S>,
    folder: &str,
    sink: &mut dyn DisplaySink,
    config: &MatrixConfig,
    wait: &mut dyn FnMut(u32),
) -> Result<(), DecodeError> {
    let paths: Vec<String> = pipeline.storage_mut().list(folder)?;

    for path in &paths {
        let brightness = config.brightness();
        if let Err(err) = pipeline.render(path, sink, Some(brightness)) {
            warn!("skipping {path}: {err}");
            sink.show_error(&format!("{path}: {err}"));
        }
        wait(config.slideshow_delay_ms());
    }
    Ok(())
}
