use leptos::prelude::*;
use stagetrack::log_info;
use stagetrack_frontend::App;

// 单线程 WASM 下使用体积更小的分配器
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: lol_alloc::AssumeSingleThreaded<lol_alloc::FreeListAllocator> =
    unsafe { lol_alloc::AssumeSingleThreaded::new(lol_alloc::FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    log_info!("[App] StageTrack {}", env!("CARGO_PKG_VERSION"));
    mount_to_body(App);
}
