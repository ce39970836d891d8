use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use tui_blocks::input::{map_event, push_event, BatchSummary, EventBatch};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn input_batching_is_allocation_free() {
    let events: Vec<Event> = (0..64u16)
        .map(|i| match i % 4 {
            0 => Event::Key(KeyEvent::from(KeyCode::Left)),
            1 => Event::Resize(80 + i, 24),
            _ => Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved,
                column: i,
                row: i / 4,
                modifiers: KeyModifiers::NONE,
            }),
        })
        .collect();
    let mut batch = EventBatch::new();

    let allocs = with_alloc_counting(|| {
        for _ in 0..50 {
            batch.clear();
            for ev in &events {
                if let Some(mapped) = map_event(ev) {
                    push_event(&mut batch, mapped);
                }
            }
            let summary = BatchSummary::from_events(&batch);
            assert!(summary.pointer.is_some());
        }
    });

    assert!(allocs == 0);
}
