//! Lifecycle of the in-process automation application

use std::path::Path;

use keysheets_core::{Application, Error, Result};

use crate::workbook::UmyaWorkbook;

/// The main handle for driving umya-spreadsheet as an automation application.
///
/// Workbooks opened through it are independent values; quitting the
/// application does not invalidate them, but no new workbook can be opened
/// afterwards.
#[derive(Debug)]
pub struct UmyaApplication {
    running: bool,
}

impl UmyaApplication {
    /// Start the application.
    pub fn start() -> Self {
        tracing::info!("Starting umya-spreadsheet application");
        Self { running: true }
    }

    fn ensure_running(&self) -> Result<()> {
        if self.running {
            Ok(())
        } else {
            Err(Error::ApplicationClosed)
        }
    }
}

impl Default for UmyaApplication {
    fn default() -> Self {
        Self::start()
    }
}

impl Application for UmyaApplication {
    type Workbook = UmyaWorkbook;

    fn open_workbook(&mut self, path: &Path) -> Result<UmyaWorkbook> {
        self.ensure_running()?;
        let workbook = UmyaWorkbook::open(path)?;
        tracing::info!("Opened workbook: {}", path.display());
        Ok(workbook)
    }

    fn create_workbook(&mut self) -> Result<UmyaWorkbook> {
        self.ensure_running()?;
        tracing::info!("Created new workbook");
        Ok(UmyaWorkbook::new())
    }

    fn quit(&mut self) -> Result<()> {
        self.ensure_running()?;
        self.running = false;
        tracing::info!("Quit umya-spreadsheet application");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
