//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`SavePort`] on two backends:
//!
//! - **`target_os = "espidf"`** — raw ESP-IDF NVS blob storage. Writes are
//!   atomic per `nvs_commit()`, so a brown-out mid-save leaves the previous
//!   snapshot readable.
//! - **`not(target_os = "espidf")`** — an in-memory store for host-side
//!   tests and simulation.
//!
//! The pet blob and its save timestamp are separate keys in one namespace;
//! [`offline_minutes`](SavePort::offline_minutes) only touches the
//! timestamp, so boot can measure the absence before decoding anything.

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::ports::SavePort;
use crate::error::SaveError;
use crate::save::SaveData;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const NAMESPACE: &str = "dolphin";
#[cfg(target_os = "espidf")]
const PET_KEY: &[u8] = b"pet\0";
#[cfg(target_os = "espidf")]
const STAMP_KEY: &[u8] = b"saved_at\0";

#[allow(dead_code)]
const MAX_BLOB_SIZE: usize = 256;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    blob: Option<Vec<u8>>,
    #[cfg(not(target_os = "espidf"))]
    saved_at: Option<u32>,
}

impl NvsAdapter {
    /// Create the adapter and initialise NVS flash.
    ///
    /// On first boot or after an IDF version bump the partition is erased
    /// and re-initialised automatically; that path also means no save, so
    /// the game falls back to the splash screen.
    pub fn new() -> Result<Self, SaveError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase run from the single
            // main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(SaveError::Io);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(SaveError::Io);
                }
            } else if ret != ESP_OK {
                return Err(SaveError::Io);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            blob: None,
            #[cfg(not(target_os = "espidf"))]
            saved_at: None,
        })
    }

    /// Open the namespace, run a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = NAMESPACE.as_bytes();
        ns_buf[..ns_bytes.len()].copy_from_slice(ns_bytes);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    #[cfg(target_os = "espidf")]
    fn read_stamp(handle: nvs_handle_t) -> Result<u32, i32> {
        let mut stamp: u32 = 0;
        let ret = unsafe { nvs_get_u32(handle, STAMP_KEY.as_ptr() as *const _, &mut stamp) };
        if ret != ESP_OK {
            return Err(ret);
        }
        Ok(stamp)
    }
}

impl SavePort for NvsAdapter {
    fn load(&self) -> Result<SaveData, SaveError> {
        #[cfg(not(target_os = "espidf"))]
        {
            match &self.blob {
                Some(bytes) => SaveData::from_bytes(bytes),
                None => Err(SaveError::NotFound),
            }
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(false, |handle| {
                let mut size: usize = 0;

                // First call: get size.
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        PET_KEY.as_ptr() as *const _,
                        core::ptr::null_mut(),
                        &mut size,
                    )
                };
                if ret != ESP_OK || size == 0 || size > MAX_BLOB_SIZE {
                    return Err(ret);
                }

                let mut buf = vec![0u8; size];
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        PET_KEY.as_ptr() as *const _,
                        buf.as_mut_ptr() as *mut _,
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(buf)
            });

            match result {
                Ok(bytes) => {
                    info!("NvsAdapter: loaded pet blob ({} bytes)", bytes.len());
                    SaveData::from_bytes(&bytes)
                }
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Err(SaveError::NotFound),
                Err(e) => {
                    warn!("NvsAdapter: NVS read error {}", e);
                    Err(SaveError::Io)
                }
            }
        }
    }

    fn save(&mut self, data: &SaveData, now_secs: u32) -> Result<(), SaveError> {
        let bytes = data.to_bytes()?;

        #[cfg(not(target_os = "espidf"))]
        {
            self.blob = Some(bytes);
            self.saved_at = Some(now_secs);
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(true, |handle| {
                let ret = unsafe {
                    nvs_set_blob(
                        handle,
                        PET_KEY.as_ptr() as *const _,
                        bytes.as_ptr() as *const _,
                        bytes.len(),
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_set_u32(handle, STAMP_KEY.as_ptr() as *const _, now_secs) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => {
                    info!("NvsAdapter: pet saved ({} bytes)", bytes.len());
                    Ok(())
                }
                Err(e) if e == ESP_ERR_NVS_NOT_ENOUGH_SPACE => {
                    warn!("NvsAdapter: NVS partition full");
                    Err(SaveError::StorageFull)
                }
                Err(e) => {
                    warn!("NvsAdapter: NVS write error {}", e);
                    Err(SaveError::Io)
                }
            }
        }
    }

    fn exists(&self) -> bool {
        #[cfg(not(target_os = "espidf"))]
        {
            self.blob.is_some()
        }

        #[cfg(target_os = "espidf")]
        {
            Self::with_nvs_handle(false, |handle| {
                let mut size: usize = 0;
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        PET_KEY.as_ptr() as *const _,
                        core::ptr::null_mut(),
                        &mut size,
                    )
                };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(size > 0)
            })
            .unwrap_or(false)
        }
    }

    fn delete(&mut self) -> Result<(), SaveError> {
        #[cfg(not(target_os = "espidf"))]
        {
            self.blob = None;
            self.saved_at = None;
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(true, |handle| {
                // Missing keys are fine; delete is idempotent.
                let ret = unsafe { nvs_erase_key(handle, PET_KEY.as_ptr() as *const _) };
                if ret != ESP_OK && ret != ESP_ERR_NVS_NOT_FOUND {
                    return Err(ret);
                }
                let ret = unsafe { nvs_erase_key(handle, STAMP_KEY.as_ptr() as *const _) };
                if ret != ESP_OK && ret != ESP_ERR_NVS_NOT_FOUND {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != ESP_OK {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!("NvsAdapter: NVS erase error {}", e);
                    Err(SaveError::Io)
                }
            }
        }
    }

    fn offline_minutes(&self, now_secs: u32) -> u32 {
        #[cfg(not(target_os = "espidf"))]
        {
            match self.saved_at {
                Some(saved) => now_secs.saturating_sub(saved) / 60,
                None => 0,
            }
        }

        #[cfg(target_os = "espidf")]
        {
            match Self::with_nvs_handle(false, Self::read_stamp) {
                Ok(saved) => now_secs.saturating_sub(saved) / 60,
                Err(_) => 0,
            }
        }
    }
}
