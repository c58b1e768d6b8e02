use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::{debug, trace};
use tokio::{
    task::JoinHandle,
    time::{self, Instant},
};

/// The slides and their indicator dots
pub trait SlideView {
    fn slide_count(&self) -> usize;
    fn set_slide_active(&mut self, index: usize, active: bool);
    fn set_indicator_active(&mut self, index: usize, active: bool);
}

/// The slide index state machine. With no slides every operation does nothing.
#[derive(Debug)]
pub struct Carousel<V> {
    view: V,
    current_slide: usize,
}

impl<V: SlideView> Carousel<V> {
    /// Activates the first slide
    pub fn new(mut view: V) -> Self {
        if view.slide_count() > 0 {
            view.set_slide_active(0, true);
            view.set_indicator_active(0, true);
        }
        Self {
            view,
            current_slide: 0,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.view.slide_count()
    }

    pub const fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Any index is accepted, including negative ones; it wraps around the slide count
    pub fn go_to(&mut self, index: isize) {
        let slide_count = self.view.slide_count();
        if slide_count == 0 {
            return;
        }
        let offset = index.unsigned_abs() % slide_count;
        if index < 0 {
            self.show((slide_count - offset) % slide_count);
        } else {
            self.show(offset);
        }
    }

    /// Shows the slide of an indicator dot; indexes past the end wrap around
    pub fn select(&mut self, index: usize) {
        let slide_count = self.view.slide_count();
        if slide_count > 0 {
            self.show(index % slide_count);
        }
    }

    pub fn next(&mut self) {
        let slide_count = self.view.slide_count();
        if slide_count > 0 {
            self.show((self.current_slide + 1) % slide_count);
        }
    }

    pub fn prev(&mut self) {
        let slide_count = self.view.slide_count();
        if slide_count > 0 {
            self.show((self.current_slide + slide_count - 1) % slide_count);
        }
    }

    fn show(&mut self, index: usize) {
        self.view.set_slide_active(self.current_slide, false);
        self.view.set_indicator_active(self.current_slide, false);
        self.current_slide = index;
        self.view.set_slide_active(index, true);
        self.view.set_indicator_active(index, true);
        trace!("Showing slide {}", index);
    }
}

/// Drives a carousel from user input and an autoplay timer. At most one timer runs at a time.
pub struct CarouselController<V> {
    carousel: Arc<Mutex<Carousel<V>>>,
    autoplay: Option<JoinHandle<()>>,
    interval: Duration,
}

impl<V> CarouselController<V>
where
    V: SlideView + Send + 'static,
{
    pub fn new(view: V, interval: Duration) -> Self {
        Self {
            carousel: Arc::new(Mutex::new(Carousel::new(view))),
            autoplay: None,
            interval,
        }
    }

    pub fn current_slide(&self) -> usize {
        self.carousel.lock().unwrap().current_slide()
    }

    pub fn inspect<R>(&self, inspector: impl FnOnce(&Carousel<V>) -> R) -> R {
        inspector(&self.carousel.lock().unwrap())
    }

    pub const fn is_autoplay_active(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Advances one slide every interval, the first time one interval from now. Replaces a
    /// running timer. Must be called from within a tokio runtime.
    pub fn start_autoplay(&mut self) {
        self.stop_autoplay();
        if self.carousel.lock().unwrap().slide_count() == 0 || self.interval.is_zero() {
            return;
        }
        let carousel = self.carousel.clone();
        let interval = self.interval;
        self.autoplay = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            loop {
                ticker.tick().await;
                carousel.lock().unwrap().next();
            }
        }));
        debug!("Autoplay started");
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay.take() {
            autoplay.abort();
            debug!("Autoplay stopped");
        }
    }

    /// The "next" button
    pub fn show_next(&mut self) {
        self.stop_autoplay();
        self.carousel.lock().unwrap().next();
        self.start_autoplay();
    }

    /// The "previous" button
    pub fn show_previous(&mut self) {
        self.stop_autoplay();
        self.carousel.lock().unwrap().prev();
        self.start_autoplay();
    }

    /// An indicator dot. Leaves autoplay alone.
    pub fn select(&mut self, index: usize) {
        self.carousel.lock().unwrap().select(index);
    }

    pub fn pointer_entered(&mut self) {
        self.stop_autoplay();
    }

    pub fn pointer_left(&mut self) {
        self.start_autoplay();
    }
}

impl<V> Drop for CarouselController<V> {
    fn drop(&mut self) {
        if let Some(autoplay) = self.autoplay.take() {
            autoplay.abort();
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{testing::RecordingSlides, Carousel, CarouselController};

    const PERIOD: Duration = Duration::from_secs(5);

    #[test]
    fn starts_on_the_first_slide() {
        let carousel = Carousel::new(RecordingSlides::new(3));
        assert_eq!(carousel.current_slide(), 0);
        assert_eq!(carousel.view().active_slides(), vec![0]);
        assert_eq!(carousel.view().active_indicators(), vec![0]);
    }

    #[test]
    fn exactly_one_slide_is_active_after_any_jump() {
        let slide_count = 4;
        let mut carousel = Carousel::new(RecordingSlides::new(slide_count));
        for index in -9..=9_isize {
            carousel.go_to(index);
            let expected = index.rem_euclid(4).unsigned_abs();
            assert_eq!(carousel.current_slide(), expected);
            assert_eq!(carousel.view().active_slides(), vec![expected]);
            assert_eq!(carousel.view().active_indicators(), vec![expected]);
        }
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let mut carousel = Carousel::new(RecordingSlides::new(3));
        carousel.prev();
        assert_eq!(carousel.current_slide(), 2);
        carousel.next();
        assert_eq!(carousel.current_slide(), 0);
        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.current_slide(), 0);
    }

    #[test]
    fn dots_past_the_end_wrap_around() {
        let mut carousel = Carousel::new(RecordingSlides::new(3));
        carousel.select(2);
        assert_eq!(carousel.current_slide(), 2);
        carousel.select(4);
        assert_eq!(carousel.current_slide(), 1);
        assert_eq!(carousel.view().active_slides(), vec![1]);
    }

    #[test]
    fn no_slides_means_no_changes() {
        let mut carousel = Carousel::new(RecordingSlides::new(0));
        carousel.go_to(3);
        carousel.select(1);
        carousel.next();
        carousel.prev();
        assert_eq!(carousel.current_slide(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_advances_once_per_period() {
        let mut controller = CarouselController::new(RecordingSlides::new(3), PERIOD);
        controller.start_autoplay();
        tokio::time::sleep(PERIOD - Duration::from_millis(1)).await;
        assert_eq!(controller.current_slide(), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(controller.current_slide(), 1);
        tokio::time::sleep(PERIOD * 2).await;
        assert_eq!(controller.current_slide(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn hovering_pauses_autoplay() {
        let mut controller = CarouselController::new(RecordingSlides::new(3), PERIOD);
        controller.start_autoplay();
        controller.pointer_entered();
        assert!(!controller.is_autoplay_active());
        tokio::time::sleep(PERIOD * 3).await;
        assert_eq!(controller.current_slide(), 0);

        controller.pointer_left();
        assert!(controller.is_autoplay_active());
        tokio::time::sleep(PERIOD + Duration::from_millis(1)).await;
        assert_eq!(controller.current_slide(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_keeps_a_single_timer() {
        let mut controller = CarouselController::new(RecordingSlides::new(5), PERIOD);
        controller.start_autoplay();
        controller.start_autoplay();
        controller.start_autoplay();
        tokio::time::sleep(PERIOD + Duration::from_millis(1)).await;
        assert_eq!(controller.current_slide(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_restarts_the_period() {
        let mut controller = CarouselController::new(RecordingSlides::new(4), PERIOD);
        controller.start_autoplay();
        tokio::time::sleep(Duration::from_secs(4)).await;
        controller.show_next();
        assert_eq!(controller.current_slide(), 1);
        assert!(controller.is_autoplay_active());
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(controller.current_slide(), 1);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(controller.current_slide(), 2);

        controller.show_previous();
        controller.show_previous();
        assert_eq!(controller.current_slide(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_a_dot_keeps_autoplay_running() {
        let mut controller = CarouselController::new(RecordingSlides::new(4), PERIOD);
        controller.start_autoplay();
        controller.select(3);
        assert!(controller.is_autoplay_active());
        controller.inspect(|carousel| {
            assert_eq!(carousel.view().active_slides(), vec![3]);
            assert_eq!(carousel.view().active_indicators(), vec![3]);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn empty_carousel_never_schedules_autoplay() {
        let mut controller = CarouselController::new(RecordingSlides::new(0), PERIOD);
        controller.start_autoplay();
        assert!(!controller.is_autoplay_active());
    }
}
