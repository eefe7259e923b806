//! Background land id search.

use std::collections::HashSet;
use std::io::{Read, Seek};
use std::sync::mpsc::{self, Receiver, TryIter};
use std::thread::{self, JoinHandle};

use log::{debug, info};

use super::{File, LandFilter, Region, Tile};
use crate::file::MulFileError;

/// Progress of a [`LandSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEvent {
	/// A tile with one of the searched ids
	Found {
		/// Tile x
		x: u32,
		/// Tile y
		y: u32,
		/// The tile record
		tile: Tile,
	},
	/// The scan is over
	Finished {
		/// Number of `Found` events sent
		matches: usize,
	},
}

/// Handle to a land id search running on its own thread.
///
/// Dropping the handle stops the worker at its next match.
#[derive(Debug)]
pub struct LandSearch<R> {
	events: Receiver<SearchEvent>,
	handle: JoinHandle<File<R>>,
}

impl<R> LandSearch<R> {
	/// Returns the event receiver.
	pub fn events(&self) -> &Receiver<SearchEvent> {
		&self.events
	}

	/// Drains the events available right now without blocking.
	pub fn try_iter(&self) -> TryIter<'_, SearchEvent> {
		self.events.try_iter()
	}

	/// Returns `true` once the worker has exited.
	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}

	/// Waits for the worker and returns the map file it was scanning.
	///
	/// Returns `None` if the worker panicked.
	pub fn join(self) -> Option<File<R>> {
		drop(self.events);
		self.handle.join().ok()
	}
}

/// Scans `region` for tiles whose land id is in `land_ids` on a background
/// thread.
///
/// Matches are streamed as [`SearchEvent::Found`] in scan order, followed by
/// one [`SearchEvent::Finished`].
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_land_search<R>(
	mut file: File<R>,
	land_ids: HashSet<u16>,
	region: Region,
	swap: bool,
) -> Result<LandSearch<R>, MulFileError>
where
	R: Read + Seek + Send + 'static,
{
	let (tx, rx) = mpsc::channel();

	let handle = thread::Builder::new().name("land-search".to_string()).spawn(move || {
		info!("searching {} land ids in {} tiles", land_ids.len(), region.tile_count());
		let filter = LandFilter::only(land_ids);

		let mut matches = 0usize;
		for (x, y, tile) in file.scan_region(region, &filter, swap) {
			if tx
				.send(SearchEvent::Found {
					x,
					y,
					tile,
				})
				.is_err()
			{
				debug!("search receiver dropped after {matches} matches");
				return file;
			}
			matches += 1;
		}

		info!("search finished: {matches} matches");
		let _ = tx.send(SearchEvent::Finished {
			matches,
		});
		file
	})?;

	Ok(LandSearch {
		events: rx,
		handle,
	})
}
