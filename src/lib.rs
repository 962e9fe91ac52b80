//! A thread-safe priority queue ordered by a caller-supplied comparator.

use core::fmt;
use core::mem;

use std::sync::RwLock;
use std::vec::Vec;

/// A priority queue implemented with a binary heap behind a reader/writer
/// lock.
///
/// The queue is ordered by a comparator supplied at construction:
/// `cmp(a, b) == true` means `a` has strictly higher priority than `b`, i.e.
/// `a` must be popped before `b`. The comparator must be a strict weak
/// ordering (irreflexive, transitive, consistent); the queue does not
/// validate this, and the order of popped items is unspecified if the
/// comparator violates it.
///
/// All methods take `&self`: the storage is guarded by a single internal
/// [`RwLock`], so a queue shared through an [`Arc`] can be pushed to and
/// popped from by many threads without any external locking. [`push`] and
/// [`pop`] take the write lock; [`len`], [`is_empty`] and [`head`] take the
/// read lock and may run concurrently with each other.
///
/// # Examples
///
/// ```
/// use sync_pq::PriorityQueue;
///
/// let queue = PriorityQueue::new(|a: &i32, b: &i32| a > b);
///
/// // There's nothing in the queue yet, so head reports no item.
/// assert_eq!(queue.head(), None);
///
/// queue.push(1);
/// queue.push(5);
/// queue.push(2);
///
/// // Now head shows the highest-priority item in the queue.
/// assert_eq!(queue.head(), Some(5));
/// assert_eq!(queue.len(), 3);
///
/// // Popping returns the items in priority order.
/// assert_eq!(queue.pop(), Some(5));
/// assert_eq!(queue.pop(), Some(2));
/// assert_eq!(queue.pop(), Some(1));
/// assert_eq!(queue.pop(), None);
///
/// assert!(queue.is_empty());
/// ```
///
/// ## Min-queue
///
/// Flipping the comparison makes `pop` return the smallest value instead of
/// the greatest one:
///
/// ```
/// use sync_pq::PriorityQueue;
///
/// let queue = PriorityQueue::new(|a: &i32, b: &i32| a < b);
///
/// queue.push(5);
/// queue.push(1);
/// queue.push(2);
///
/// assert_eq!(queue.pop(), Some(1));
/// assert_eq!(queue.pop(), Some(2));
/// assert_eq!(queue.pop(), Some(5));
/// ```
///
/// ## Sharing across threads
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use sync_pq::PriorityQueue;
///
/// let queue = Arc::new(PriorityQueue::new(|a: &u32, b: &u32| a > b));
///
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let queue = Arc::clone(&queue);
///         thread::spawn(move || queue.push(i))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(queue.len(), 4);
/// assert_eq!(queue.pop(), Some(3));
/// ```
///
/// # Time complexity
///
/// | [push]        | [pop]         | [head] |
/// |---------------|---------------|--------|
/// | *O*(log(*n*)) | *O*(log(*n*)) | *O*(1) |
///
/// Every operation holds the lock for at most one heap operation, so the
/// worst-case wait of any caller is bounded by *O*(log(*n*)) plus whatever
/// the comparator costs.
///
/// [`Arc`]: std::sync::Arc
/// [push]: PriorityQueue::push
/// [pop]: PriorityQueue::pop
/// [head]: PriorityQueue::head
/// [`push`]: PriorityQueue::push
/// [`pop`]: PriorityQueue::pop
/// [`len`]: PriorityQueue::len
/// [`is_empty`]: PriorityQueue::is_empty
/// [`head`]: PriorityQueue::head
pub struct PriorityQueue<T, F> {
    data: RwLock<Vec<T>>,
    cmp: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Creates an empty `PriorityQueue` ordered by `cmp`.
    ///
    /// `cmp(a, b) == true` must mean "`a` is popped before `b`".
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sync_pq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::new(|a: &i32, b: &i32| a > b);
    /// queue.push(4);
    /// ```
    #[must_use]
    pub fn new(cmp: F) -> PriorityQueue<T, F> {
        PriorityQueue {
            data: RwLock::new(Vec::new()),
            cmp,
        }
    }

    /// Creates an empty `PriorityQueue` with a specific capacity.
    /// This preallocates enough memory for `capacity` items, so that
    /// the storage does not have to be reallocated until the queue
    /// contains at least that many values.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sync_pq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::with_capacity(|a: &i32, b: &i32| a > b, 10);
    /// queue.push(4);
    /// ```
    #[must_use]
    pub fn with_capacity(cmp: F, capacity: usize) -> PriorityQueue<T, F> {
        PriorityQueue {
            data: RwLock::new(Vec::with_capacity(capacity)),
            cmp,
        }
    }

    /// Pushes an item onto the queue.
    ///
    /// Takes the write lock for the duration of one sift-up.
    ///
    /// # Panics
    ///
    /// Propagates a panic raised by the comparator, and panics if the lock
    /// was poisoned by an earlier comparator panic. A queue whose comparator
    /// has panicked must be treated as corrupted and discarded.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sync_pq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::new(|a: &i32, b: &i32| a > b);
    /// queue.push(3);
    /// queue.push(5);
    /// queue.push(1);
    ///
    /// assert_eq!(queue.len(), 3);
    /// assert_eq!(queue.head(), Some(5));
    /// ```
    ///
    /// # Time complexity
    ///
    /// The worst case cost of a single call is *O*(*n*), when capacity is
    /// exhausted and the storage needs a resize; the sift-up itself is
    /// *O*(log(*n*)) and the amortized cost per push is *O*(log(*n*)).
    pub fn push(&self, item: T) {
        let mut data = self.data.write().unwrap();
        data.push(item);
        let pos = data.len() - 1;
        sift_up(&mut data, &self.cmp, pos);
    }

    /// Removes the highest-priority item from the queue and returns it, or
    /// `None` if the queue is empty.
    ///
    /// Popping from an empty queue is not an error and leaves the queue
    /// untouched.
    ///
    /// # Panics
    ///
    /// Propagates a panic raised by the comparator, and panics if the lock
    /// was poisoned by an earlier comparator panic.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sync_pq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::new(|a: &i32, b: &i32| a > b);
    /// queue.push(1);
    /// queue.push(3);
    ///
    /// assert_eq!(queue.pop(), Some(3));
    /// assert_eq!(queue.pop(), Some(1));
    /// assert_eq!(queue.pop(), None);
    /// ```
    ///
    /// # Time complexity
    ///
    /// The worst case cost of `pop` on a queue containing *n* items is
    /// *O*(log(*n*)).
    pub fn pop(&self) -> Option<T> {
        let mut data = self.data.write().unwrap();
        data.pop().map(|mut item| {
            if !data.is_empty() {
                mem::swap(&mut item, &mut data[0]);
                sift_down(&mut data, &self.cmp, 0);
            }
            item
        })
    }
}

impl<T, F> PriorityQueue<T, F> {
    /// Returns a copy of the highest-priority item without removing it, or
    /// `None` if the queue is empty.
    ///
    /// The highest-priority item sits at the root of the heap, so this only
    /// clones one value. `head` takes the read lock and may run concurrently
    /// with [`len`], [`is_empty`] and other `head` calls, but never overlaps
    /// a [`push`] or [`pop`].
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sync_pq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::new(|a: &i32, b: &i32| a > b);
    /// assert_eq!(queue.head(), None);
    ///
    /// queue.push(1);
    /// queue.push(5);
    /// queue.push(2);
    /// assert_eq!(queue.head(), Some(5));
    /// ```
    ///
    /// # Time complexity
    ///
    /// Cost is *O*(1) in the worst case.
    ///
    /// [`len`]: PriorityQueue::len
    /// [`is_empty`]: PriorityQueue::is_empty
    /// [`push`]: PriorityQueue::push
    /// [`pop`]: PriorityQueue::pop
    #[must_use]
    pub fn head(&self) -> Option<T>
    where
        T: Clone,
    {
        let data = self.data.read().unwrap();
        data.get(0).cloned()
    }

    /// Returns the number of items in the queue.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sync_pq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::new(|a: &i32, b: &i32| a > b);
    /// queue.push(1);
    /// queue.push(3);
    ///
    /// assert_eq!(queue.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    /// Checks if the queue is empty.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sync_pq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::new(|a: &i32, b: &i32| a > b);
    /// assert!(queue.is_empty());
    ///
    /// queue.push(3);
    /// assert!(!queue.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: fmt::Debug, F> fmt::Debug for PriorityQueue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.read().unwrap();
        f.debug_list().entries(data.iter()).finish()
    }
}

// Both helpers derive from the one comparator convention:
// cmp(a, b) == true means a is popped before b.

/// Moves the item at `pos` towards the root while it strictly outranks its
/// parent.
fn sift_up<T, F>(data: &mut [T], cmp: &F, mut pos: usize)
where
    F: Fn(&T, &T) -> bool,
{
    while pos > 0 {
        let parent = (pos - 1) / 2;
        if !cmp(&data[pos], &data[parent]) {
            break;
        }
        data.swap(pos, parent);
        pos = parent;
    }
}

/// Moves the item at `pos` towards the leaves while one of its children
/// strictly outranks it, always descending into the higher-priority child.
/// Ties between siblings go to the left child.
fn sift_down<T, F>(data: &mut [T], cmp: &F, mut pos: usize)
where
    F: Fn(&T, &T) -> bool,
{
    let end = data.len();
    loop {
        let mut child = 2 * pos + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && cmp(&data[child + 1], &data[child]) {
            child += 1;
        }
        if !cmp(&data[child], &data[pos]) {
            break;
        }
        data.swap(pos, child);
        pos = child;
    }
}
