use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::{Error, Request, Result, Transport, ROOMS_PATH};
use crate::types::Room;

/// Rooms from one listing, indexed by name.
///
/// Names are not unique on the service side; the last room listed under a
/// name wins.
#[derive(Debug, Default)]
pub struct RoomIndex {
    rooms: Vec<Room>,
    ids: HashMap<String, u64>,
}

impl RoomIndex {
    pub fn new(rooms: Vec<Room>) -> Self {
        let ids = rooms
            .iter()
            .map(|room| (room.name.clone(), room.room_id))
            .collect();
        Self { rooms, ids }
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<u64> {
        self.ids.get(name).copied()
    }

    /// Rooms in the order the service listed them
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[derive(Debug)]
enum State {
    Unloaded,
    Loaded(Arc<RoomIndex>),
}

/// Name to id cache, filled from the room listing on first use
#[derive(Debug)]
pub struct RoomDirectory {
    state: RwLock<State>,
    // Held while fetching so concurrent first lookups share one listing
    populate: Mutex<()>,
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::Unloaded),
            populate: Mutex::new(()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded().is_some()
    }

    fn loaded(&self) -> Option<Arc<RoomIndex>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            State::Unloaded => None,
            State::Loaded(index) => Some(Arc::clone(index)),
        }
    }

    /// Fetch the room list and replace the whole index
    pub fn refresh<T: Transport + ?Sized>(&self, transport: &T) -> Result<Arc<RoomIndex>> {
        let _guard = self.populate.lock().unwrap_or_else(PoisonError::into_inner);
        self.fetch(transport)
    }

    /// Look up a room id by name, fetching the room list if it was never loaded
    pub fn resolve<T: Transport + ?Sized>(&self, transport: &T, name: &str) -> Result<Option<u64>> {
        let index = match self.loaded() {
            Some(index) => index,
            None => {
                let _guard = self.populate.lock().unwrap_or_else(PoisonError::into_inner);
                // Another caller may have finished loading while we waited
                match self.loaded() {
                    Some(index) => index,
                    None => self.fetch(transport)?,
                }
            }
        };
        Ok(index.get(name))
    }

    fn fetch<T: Transport + ?Sized>(&self, transport: &T) -> Result<Arc<RoomIndex>> {
        let res = transport.execute(&Request::get(ROOMS_PATH))?;

        // The service answers 204 with no body when there is nothing to list
        let rooms: Vec<Room> = if res.status == 204 {
            Vec::new()
        } else if res.is_success() {
            serde_json::from_slice(&res.body).map_err(Error::Decode)?
        } else {
            return Err(Error::Api {
                status: res.status,
                body: res.text(),
            });
        };

        let index = Arc::new(RoomIndex::new(rooms));
        tracing::info!("Loaded {} rooms", index.len());

        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            State::Loaded(Arc::clone(&index));
        Ok(index)
    }
}
